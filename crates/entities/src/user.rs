//! User and session entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store on registration.
    pub id: i64,
    /// Login name, unique across all users.
    pub username: String,
    /// PHC-format password hash. Never the plaintext.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// An authenticated session.
///
/// Created at login and dropped at logout. User-scoped repository
/// operations take a `&Session` instead of reading ambient state, so the
/// owning user is always explicit at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user's id.
    pub user_id: i64,
    /// The authenticated user's login name.
    pub username: String,
    /// When the session was established.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for an authenticated user.
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_carries_user() {
        let session = Session::new(7, "alice");

        assert_eq!(session.user_id, 7);
        assert_eq!(session.username, "alice");
    }
}
