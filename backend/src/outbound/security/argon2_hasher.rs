//! Argon2id implementation of the password hashing port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes passwords with Argon2id at the library's default parameters and
/// a per-password random salt. The digest embeds its salt and parameters,
/// so old digests stay verifiable if the defaults ever change.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    inner: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.inner
            .hash_password(plain.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|err| PasswordHashError::new(err.to_string()))
    }

    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(digest).map_err(|err| PasswordHashError::new(err.to_string()))?;
        match self.inner.verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::new(err.to_string())),
        }
    }
}
