//! Database module
//!
//! SQLite-backed settings store.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
