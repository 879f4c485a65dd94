//! Database connection pool and schema management.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::{schema, StoreResult};

/// Database connection pool.
///
/// Opening a database also brings the schema up to date, so a pool that
/// exists is always ready to serve the services. Schema failure is fatal
/// to startup and propagates to the caller.
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Opens (creating if necessary) the database at the given path.
    pub async fn new(db_path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Opens a fresh in-memory database, for tests.
    ///
    /// The pool is capped at a single connection: every SQLite in-memory
    /// database is private to the connection that opened it.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Creates the tables if absent, then applies incremental migrations.
    ///
    /// Safe to run on every startup: existing data is never touched.
    async fn run_migrations(&self) -> StoreResult<()> {
        for ddl in schema::CREATE_TABLES {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        self.run_incremental_migrations().await?;

        tracing::debug!("database schema is up to date");
        Ok(())
    }

    /// Runs incremental migrations for databases created by older builds.
    async fn run_incremental_migrations(&self) -> StoreResult<()> {
        // Migration: add the priority column to tasks if it doesn't exist.
        // SQLite errors when the column is already present; ignore that.
        let result = sqlx::query("ALTER TABLE tasks ADD COLUMN priority TEXT DEFAULT 'Medium'")
            .execute(&self.pool)
            .await;
        if result.is_ok() {
            tracing::info!("migrated tasks table: added priority column");
        }

        Ok(())
    }
}

/// Default on-disk location of the tracker database.
///
/// Lives under the user's home directory; `None` when no home directory
/// can be determined.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".taskdeck").join("taskdeck.db"))
}
