//! Port abstraction for user document persistence.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};
use crate::domain::Error;

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// The store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<UserStoreError> for Error {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::Connection { message } => {
                Error::service_unavailable(format!("user store unavailable: {message}"))
            }
            UserStoreError::Query { message } => {
                Error::internal(format!("user store error: {message}"))
            }
        }
    }
}

/// Document-store operations over user documents.
///
/// `update` writes the whole document back; callers are expected to hold
/// the per-document mutation lock across read-modify-write sequences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user document.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;

    /// Replace an existing user document.
    async fn update(&self, user: &User) -> Result<(), UserStoreError>;

    /// Delete a user document. Returns `true` when a document was removed.
    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError>;
}
