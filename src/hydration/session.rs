//! Session duration planning
//!
//! Works out how many minutes should pass between drinking reminders and
//! snaps that to one of the intervals the app offers.

use tracing::debug;

use super::sip::ml_for_size;

/// Allowed minutes between reminders, ascending (15 is listed twice)
pub const SESSION_TIMES: [u32; 7] = [5, 15, 15, 30, 60, 90, 120];

/// Waking window the daily amount is spread across
pub const WAKING_WINDOW_MINUTES: f64 = 12.0 * 60.0;

/// Minutes between reminders for a daily amount and sip size
///
/// A zero or negative amount is not rejected: the raw interval becomes
/// infinite or negative and the snap lands on the first session time.
pub fn calc(drink_amount_ml: f64, sip_identifier: &str) -> u32 {
    let sip_ml = ml_for_size(sip_identifier) as f64;
    let sips_needed = drink_amount_ml / sip_ml;
    let raw = WAKING_WINDOW_MINUTES / sips_needed;
    let snapped = round_to_nearest_session_time(raw);
    debug!(drink_amount_ml, sip_identifier, raw, snapped, "session duration");
    snapped
}

/// Closest entry of [`SESSION_TIMES`] to `minutes`
///
/// Scans in order and only replaces the candidate on a strictly smaller
/// distance, so ties keep the earlier entry.
pub fn round_to_nearest_session_time(minutes: f64) -> u32 {
    let mut closest = SESSION_TIMES[0];
    for &time in SESSION_TIMES.iter() {
        if (time as f64 - minutes).abs() < (closest as f64 - minutes).abs() {
            closest = time;
        }
    }
    closest
}

/// Human label for a reminder interval
pub fn format_duration(minutes: u32) -> String {
    if minutes < 120 {
        format!("{} min", minutes)
    } else {
        let hours = minutes / 60;
        format!("{} hour{}", hours, if hours > 1 { "s" } else { "" })
    }
}
