//! Utility functions shared across the codebase.
//!
//! Clock-time conversions between `HH:MM` strings and fractional hours, plus
//! path formatting for log output.

use chrono::{NaiveTime, Timelike};
use std::path::Path;

use super::constants::HOURS_PER_DAY;

/// Parse an `HH:MM` or `HH:MM:SS` clock string into fractional hours.
///
/// Returns `None` for empty, malformed or out-of-range input (hours 0-23,
/// minutes 0-59). Rise/set tables use empty cells for days without an event,
/// so absence is the normal result for a blank field.
pub fn parse_clock_hours(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_matches('"');
    if trimmed.is_empty() {
        return None;
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()?;

    Some(time_to_hours(time))
}

/// Convert a `NaiveTime` into fractional hours since midnight.
pub fn time_to_hours(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

/// Format fractional hours as `HH:MM`, truncating seconds.
pub fn format_clock_hours(hours: f64) -> String {
    let total_minutes = (hours.rem_euclid(HOURS_PER_DAY) * 60.0).floor() as u32;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Format an optional hour value, using `--:--` for absent events.
pub fn format_optional_hours(hours: Option<f64>) -> String {
    hours.map(format_clock_hours).unwrap_or_else(|| "--:--".to_string())
}

/// Replace the home directory prefix with `~` for log output.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_clock_hours_valid() {
        assert_eq!(parse_clock_hours("06:00"), Some(6.0));
        assert_eq!(parse_clock_hours("23:30"), Some(23.5));
        assert_eq!(parse_clock_hours(" 11:15 "), Some(11.25));
        assert_eq!(parse_clock_hours("\"00:45\""), Some(0.75));
        let with_seconds = parse_clock_hours("12:00:36").unwrap();
        assert!((with_seconds - 12.01).abs() < 1e-9);
    }

    #[test]
    fn test_parse_clock_hours_absent_or_malformed() {
        assert_eq!(parse_clock_hours(""), None);
        assert_eq!(parse_clock_hours("   "), None);
        assert_eq!(parse_clock_hours("24:00"), None);
        assert_eq!(parse_clock_hours("12:60"), None);
        assert_eq!(parse_clock_hours("noon"), None);
        assert_eq!(parse_clock_hours("12"), None);
    }

    #[test]
    fn test_format_clock_hours() {
        assert_eq!(format_clock_hours(0.0), "00:00");
        assert_eq!(format_clock_hours(5.67), "05:40");
        assert_eq!(format_clock_hours(23.5), "23:30");
        assert_eq!(format_optional_hours(None), "--:--");
        assert_eq!(format_optional_hours(Some(19.25)), "19:15");
    }

    #[test]
    fn test_private_path_outside_home() {
        let path = PathBuf::from("/tmp/timepixel/sun.csv");
        assert_eq!(private_path(&path), "/tmp/timepixel/sun.csv");
    }
}
