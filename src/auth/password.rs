use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

/// Bcrypt cost used for stored credentials
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a password with bcrypt at the given cost.
///
/// Runs on the blocking pool. The returned string carries its own salt
/// and cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hashing(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash on the blocking pool.
///
/// `Ok(false)` is a mismatch. A stored value that is not a bcrypt hash
/// is an error.
pub async fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let password = password.to_string();
    let stored = stored.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &stored).map_err(|e| PasswordError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hashing(format!("Task join error: {}", e)))?
}
