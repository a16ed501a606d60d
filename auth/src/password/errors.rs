use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Covers both a wrong password and an unreadable stored hash.
    #[error("Password does not match")]
    Mismatch,
}
