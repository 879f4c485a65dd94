//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Every failure is caught at the service boundary and surfaced as one of
/// these; nothing panics through to the presentation layer. A failed
/// authentication is not an error, it is the `Ok(None)` path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Registration attempted with a username that already exists.
    #[error("Username already exists")]
    DuplicateUsername,

    /// The identified row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record, e.g. "Project".
        entity: &'static str,
        /// The id that was looked up.
        id: i64,
    },

    /// A field failed server-side validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password hashing or verification failed.
    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
