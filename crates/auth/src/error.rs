//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// The password does not meet minimum strength requirements.
    #[error("Password too weak: {0}")]
    WeakPassword(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
