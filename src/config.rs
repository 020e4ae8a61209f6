//! Runtime configuration
//!
//! Everything is read from the environment once at startup.

use std::env;
use std::path::PathBuf;

use tracing::info;

/// Pricing backend used when `DRINKNOW_BACKEND_URL` is unset
pub const DEFAULT_BACKEND_URL: &str = "http://drinknow.test:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub backend_url: String,
    pub locale: Option<String>,
    /// Id the licensing backend knows this install by
    pub device_id: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_path: database_path(),
            backend_url: env::var("DRINKNOW_BACKEND_URL").unwrap_or_else(|_| {
                info!("DRINKNOW_BACKEND_URL not set, using default: {DEFAULT_BACKEND_URL}");
                DEFAULT_BACKEND_URL.to_string()
            }),
            locale: detect_locale(),
            device_id: env::var("DRINKNOW_DEVICE_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
        }
    }
}

/// Get the database path from environment or use `<project>/data/drinknow.db`
fn database_path() -> PathBuf {
    env::var("DRINKNOW_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("drinknow.db");
            path
        })
}

/// Locale from `DRINKNOW_LOCALE`, then `LC_ALL`, then `LANG`
fn detect_locale() -> Option<String> {
    ["DRINKNOW_LOCALE", "LC_ALL", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find_map(|value| normalize_locale(&value))
}

/// Turn a POSIX locale ("en_US.UTF-8", "de_DE@euro") into "en-US" form
///
/// "C" and "POSIX" carry no language and yield None.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_posix_locale() {
        assert_eq!(normalize_locale("en_US.UTF-8"), Some("en-US".to_string()));
        assert_eq!(normalize_locale("de_DE@euro"), Some("de-DE".to_string()));
        assert_eq!(normalize_locale("fr"), Some("fr".to_string()));
        assert_eq!(normalize_locale("en-GB"), Some("en-GB".to_string()));
    }

    #[test]
    fn test_normalize_rejects_neutral_locales() {
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale(""), None);
    }
}
