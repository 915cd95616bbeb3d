//! # DataStore Module
//!
//! This module provides functionality for interacting with a SQLite database
//! to store and retrieve generated tutorials and their video clip metadata.
//!
//! The module uses sqlx for database operations and provides an abstraction
//! layer for the four tutorial operations: the two insert paths, selection
//! by uploader and content edits.

mod datastore;
mod domain;

pub use datastore::sqlite::SqliteDataStore;
pub use datastore::DataStore;
pub use domain::Tutorial;
