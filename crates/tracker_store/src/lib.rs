//! SQLite-backed project and task storage for Taskdeck.
//!
//! The [`Database`] owns the connection pool and keeps the schema up to
//! date; the services layered on top of it cover the three tables:
//! [`CredentialService`] for users, [`ProjectService`] for projects, and
//! [`TaskService`] for tasks. Reads come back as plain entity records
//! enriched with the derived display numbers and overdue flags; nothing
//! store-specific leaks to callers.

mod credentials;
mod database;
mod error;
mod projects;
mod schema;
mod tasks;

pub use credentials::*;
pub use database::*;
pub use error::*;
pub use projects::*;
pub use tasks::*;
