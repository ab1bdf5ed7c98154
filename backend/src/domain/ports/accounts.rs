//! Driving port for account lifecycle operations.

use async_trait::async_trait;

use crate::domain::user::{ProfilePatch, UserId, UserProfile};
use crate::domain::Error;

/// Validated signup payload.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signup, login, and profile maintenance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new user; duplicate emails are a `Conflict`.
    async fn sign_up(&self, request: SignUpRequest) -> Result<UserProfile, Error>;

    /// Verify credentials. Unknown email and wrong password both fail
    /// with the same `Unauthorized` message.
    async fn log_in(&self, email: String, password: String) -> Result<UserProfile, Error>;

    /// Apply a partial profile update.
    async fn edit_profile(&self, user_id: UserId, patch: ProfilePatch)
        -> Result<UserProfile, Error>;

    /// Remove the user document. Owned recipes are left in place.
    async fn delete_account(&self, user_id: UserId) -> Result<(), Error>;
}
