//! Data models
//!
//! Rust structs representing database entities.

mod settings;

pub use settings::{UserSettings, UserSettingsUpdate};
