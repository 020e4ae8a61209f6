//! Build metadata embedded by `build.rs`, reported by `drinknow_status`

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which binary is answering, for the status tool and the startup log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub compiled_at: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_env(
            option_env!("DRINKNOW_BUILD_NUMBER"),
            option_env!("DRINKNOW_BUILD_TIMESTAMP"),
        )
    }

    /// A missing or garbled build number reads as 0, a missing timestamp as "unknown"
    fn from_env(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            compiled_at: timestamp.unwrap_or("unknown"),
        }
    }
}
