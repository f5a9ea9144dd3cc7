use argon2::{
    password_hash::{self, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// Password hashing seam; `Argon2Hasher` in production.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ServiceError>;
    /// `Ok(false)` on mismatch, `Err` only when the stored hash is unusable.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| ServiceError::Hash(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(ServiceError::Hash(e.to_string())),
        }
    }
}
