//! Account lifecycle: signup, login, and profile maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::task;
use tracing::{debug, info};

use crate::domain::ports::{Accounts, PasswordHasher, SignUpRequest, UserRepository};
use crate::domain::user::{EmailAddress, ProfilePatch, User, UserId, UserProfile};
use crate::domain::Error;

/// Login failures all share one message so callers cannot probe which
/// emails are registered.
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Implements the account operations over the user store and the password
/// hashing primitive. Hashing is CPU-bound, so it runs on a blocking
/// thread rather than on the async executor.
pub struct AccountService<U, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H: ?Sized> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn hash_password(&self, password: String) -> Result<String, Error> {
        let hasher = Arc::clone(&self.hasher);
        let digest = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))??;
        Ok(digest)
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let matched = task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))??;
        Ok(matched)
    }

    async fn load_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<U, H> Accounts for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<UserProfile, Error> {
        let SignUpRequest {
            name,
            email,
            password,
        } = request;
        if name.trim().is_empty() {
            return Err(Error::invalid_request("name must not be empty")
                .with_details(json!({ "field": "name" })));
        }
        if password.is_empty() {
            return Err(Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password" })));
        }
        let email = EmailAddress::new(&email).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "email" }))
        })?;

        // Check-then-insert; the store offers no unique constraint, so a
        // concurrent signup for the same email can slip through. Accepted
        // for this store model.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::conflict("this email has already been registered"));
        }

        let digest = self.hash_password(password).await?;
        let user = User::new(name, email, digest);
        self.users.insert(&user).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(user.profile())
    }

    async fn log_in(&self, email: String, password: String) -> Result<UserProfile, Error> {
        let Ok(email) = EmailAddress::new(&email) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let matched = self
            .verify_password(password, user.password_digest().to_owned())
            .await?;
        if !matched {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        debug!(user_id = %user.id(), "user logged in");
        Ok(user.profile())
    }

    async fn edit_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<UserProfile, Error> {
        let mut user = self.load_user(user_id).await?;
        user.apply_profile_patch(patch);
        self.users.update(&user).await?;
        Ok(user.profile())
    }

    async fn delete_account(&self, user_id: UserId) -> Result<(), Error> {
        // Owned recipes stay in place; their ledger entries die with the
        // user document.
        if !self.users.delete(user_id).await? {
            return Err(Error::not_found("user not found"));
        }
        info!(user_id = %user_id, "account deleted");
        Ok(())
    }
}
