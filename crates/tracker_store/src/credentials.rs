//! User registration and authentication.

use std::sync::Arc;

use entities::Session;

use crate::{schema::UserRow, Database, StoreError, StoreResult};

/// Service for registering and authenticating users.
pub struct CredentialService {
    db: Arc<Database>,
}

impl CredentialService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Registers a new user and returns the assigned user id.
    ///
    /// Only the Argon2id hash of the password is persisted. Fails with
    /// [`StoreError::DuplicateUsername`] when the name is taken, leaving
    /// the users table untouched.
    pub async fn register(&self, username: &str, password: &str) -> StoreResult<i64> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::InvalidInput(
                "username must not be empty".to_string(),
            ));
        }
        auth::validate_password(password)?;

        let password_hash = auth::hash_password(password)?;

        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(&password_hash)
            .execute(self.db.pool())
            .await
            .map_err(|e| {
                if matches!(&e, sqlx::Error::Database(db_err) if db_err.is_unique_violation()) {
                    StoreError::DuplicateUsername
                } else {
                    StoreError::Database(e)
                }
            })?;

        let user_id = result.last_insert_rowid();
        tracing::info!(user_id, "registered user");
        Ok(user_id)
    }

    /// Checks a username/password pair.
    ///
    /// Returns the user id on an exact match, `None` otherwise. The caller
    /// learns nothing about whether the username or the password was wrong.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<Option<i64>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?")
                .bind(username.trim())
                .fetch_optional(self.db.pool())
                .await?;

        let Some(user) = row else {
            return Ok(None);
        };

        if auth::verify_password(password, &user.password_hash)? {
            Ok(Some(user.id))
        } else {
            tracing::debug!(user_id = user.id, "password mismatch");
            Ok(None)
        }
    }

    /// Authenticates and opens a session.
    ///
    /// The returned [`Session`] is the context user-scoped repository
    /// operations expect; dropping it is logout.
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<Option<Session>> {
        let Some(user_id) = self.authenticate(username, password).await? else {
            return Ok(None);
        };
        Ok(Some(Session::new(user_id, username.trim())))
    }
}
