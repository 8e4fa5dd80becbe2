//! Time formatting helpers.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format a duration in seconds as its two most significant units,
/// e.g. `365d 0h`, `30d 10h`, `2h 5m`.
pub fn format_duration(secs: u64) -> String {
    if secs < MINUTE {
        format!("{}s", secs)
    } else if secs < HOUR {
        format!("{}m {}s", secs / MINUTE, secs % MINUTE)
    } else if secs < DAY {
        format!("{}h {}m", secs / HOUR, (secs % HOUR) / MINUTE)
    } else {
        format!("{}d {}h", secs / DAY, (secs % DAY) / HOUR)
    }
}
