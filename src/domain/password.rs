//! Password hashing for user credentials.

use bcrypt::BcryptError;
use thiserror::Error;

/// Work factor for newly created hashes.
const PASSWORD_COST: u32 = 10;

/// Errors surfaced by hashing or verifying a password.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    Hash(#[source] BcryptError),
    #[error("password verification failed: {0}")]
    Verify(#[source] BcryptError),
}

/// Hash a plaintext password with bcrypt.
///
/// Blocking; call through `spawn_blocking` from async contexts.
pub fn hash(password: &str) -> Result<String, PasswordHashError> {
    bcrypt::hash(password, PASSWORD_COST).map_err(PasswordHashError::Hash)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Blocking; call through `spawn_blocking` from async contexts.
pub fn verify(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    bcrypt::verify(password, stored_hash).map_err(PasswordHashError::Verify)
}
