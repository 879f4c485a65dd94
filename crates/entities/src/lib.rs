//! Core entity definitions for Taskdeck.
//!
//! This crate defines the data types shared across the Taskdeck
//! application: users and sessions, projects, tasks, and the derived
//! read-time values (display numbers, overdue flags, progress means)
//! that are recomputed on every fetch and never persisted.

mod project;
mod task;
mod user;

pub use project::*;
pub use task::*;
pub use user::*;
