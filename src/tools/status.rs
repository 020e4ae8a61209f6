//! DrinkNow Status Tool
//!
//! Runtime status plus the usage guide returned by `hydration_instructions`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::hydration::{detect_measure_system, MeasureSystem};

/// Hydration planning instructions for AI assistants
pub const HYDRATION_INSTRUCTIONS: &str = r#"
# DrinkNow Hydration Planning

## Welcome flow

1. `detect_measure_system` - pass the user's locale (e.g. "en-US") or omit it
   to use the server locale. US, Liberia and Myanmar use Imperial (lbs, oz);
   everything else is Metric (kg, ml).
2. `gender_profile` - default weight and illustration key for Male, Female
   or Other. Use the default weight when the user does not give one.
3. `plan_hydration` - gender, weight (in the user's system), sip size.
   Returns the daily range, the selected amount and the reminder interval.
4. `apply_plan` - store the plan in the user's settings.

## Sip sizes

| id | volume | description |
|----|--------|-------------|
| FullCup | 330 ml | a glass |
| HalfCup | 165 ml | half a glass |
| BigSip | 45 ml | a big sip |

`calculate_session_duration` accepts any id. Unknown ids drink 100 ml at a
time and report no description.

## Reminder intervals

The interval is 720 minutes (a 12 hour waking day) divided by the number of
sips needed, snapped to one of 5, 15, 30, 60, 90 or 120 minutes. When the
raw value is exactly between two options the shorter one is used.

## Units

All stored values are kilograms and milliliters. Convert for display with
`convert_weight` / `convert_volume` (direction `from_canonical`) and convert
user input with direction `to_canonical`. Conversions round to whole units.
"#;

/// Runtime status of the DrinkNow service
#[derive(Debug, Clone, Serialize)]
pub struct DrinkNowStatus {
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Environment the plans are computed for
    pub backend_url: String,
    pub locale: Option<String>,
    pub measure_system: MeasureSystem,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    database_path: PathBuf,
    backend_url: String,
    locale: Option<String>,
}

impl StatusTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            database_path: config.database_path.clone(),
            backend_url: config.backend_url.clone(),
            locale: config.locale.clone(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> DrinkNowStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        DrinkNowStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            backend_url: self.backend_url.clone(),
            locale: self.locale.clone(),
            measure_system: detect_measure_system(self.locale.as_deref()),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reflects_config() {
        let config = Config {
            database_path: PathBuf::from("/nonexistent/drinknow.db"),
            backend_url: "http://localhost:8080".to_string(),
            locale: Some("en-US".to_string()),
            device_id: None,
        };
        let status = StatusTracker::new(&config).get_status();
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.measure_system, MeasureSystem::Imperial);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build.version, env!("CARGO_PKG_VERSION"));
    }
}
