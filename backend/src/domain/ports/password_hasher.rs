//! Port abstraction for the password hashing primitive.

use crate::domain::Error;

/// Error raised when hashing or digest parsing fails. A mismatched
/// password is not an error; `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    pub message: String,
}

impl PasswordHashError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<PasswordHashError> for Error {
    fn from(err: PasswordHashError) -> Self {
        Error::internal(err.to_string())
    }
}

/// Hashing primitive used at signup and login.
///
/// Implementations are CPU-bound and synchronous; callers move the work
/// onto a blocking thread.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a storable digest.
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored digest.
    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordHashError>;
}
