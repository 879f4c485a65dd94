//! Password hashing and verification for Taskdeck.
//!
//! Passwords are hashed with Argon2id using a random salt and stored in
//! PHC string format, so the algorithm parameters and salt travel with
//! the hash. This crate has no storage concerns; the tracker store
//! persists whatever hash string it is given.

mod error;
mod password;

pub use error::*;
pub use password::*;
