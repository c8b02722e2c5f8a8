//! Table-wide summaries: seasonal daylight extremes and data quality.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::{AstroTable, DailyRecord};
use crate::resolver::{MoonWindow, VisibilitySource};

/// A day singled out by some measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayExtreme {
    /// 0-based table index
    pub day: usize,
    pub date: Option<NaiveDate>,
    /// The measured value in hours
    pub hours: f64,
}

/// Daylight extremes across a table.
///
/// Only days the sun is up on contribute: both sunrise and sunset present with
/// sunrise not after sunset. Ties keep the earliest day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonalStats {
    pub days_with_sun: usize,
    pub average_daylight: Option<f64>,
    pub shortest_day: Option<DayExtreme>,
    pub longest_day: Option<DayExtreme>,
    pub earliest_sunrise: Option<DayExtreme>,
    pub latest_sunrise: Option<DayExtreme>,
    pub earliest_sunset: Option<DayExtreme>,
    pub latest_sunset: Option<DayExtreme>,
}

impl SeasonalStats {
    pub fn from_table(table: &AstroTable) -> Self {
        let mut stats = Self::default();
        let mut total_daylight = 0.0;

        for (day, record) in table.records().iter().enumerate() {
            let (Some(sunrise), Some(sunset)) = (record.sun.rise, record.sun.set) else {
                continue;
            };
            if sunrise > sunset {
                continue;
            }
            let daylight = sunset - sunrise;
            let extreme = |hours| DayExtreme {
                day,
                date: record.date,
                hours,
            };

            stats.days_with_sun += 1;
            total_daylight += daylight;

            keep_if(&mut stats.shortest_day, extreme(daylight), |new, old| new < old);
            keep_if(&mut stats.longest_day, extreme(daylight), |new, old| new > old);
            keep_if(&mut stats.earliest_sunrise, extreme(sunrise), |new, old| new < old);
            keep_if(&mut stats.latest_sunrise, extreme(sunrise), |new, old| new > old);
            keep_if(&mut stats.earliest_sunset, extreme(sunset), |new, old| new < old);
            keep_if(&mut stats.latest_sunset, extreme(sunset), |new, old| new > old);
        }

        if stats.days_with_sun > 0 {
            stats.average_daylight = Some(total_daylight / stats.days_with_sun as f64);
        }
        stats
    }
}

fn keep_if(slot: &mut Option<DayExtreme>, candidate: DayExtreme, better: impl Fn(f64, f64) -> bool) {
    match slot {
        Some(current) if !better(candidate.hours, current.hours) => {}
        _ => *slot = Some(candidate),
    }
}

/// Shape of a loaded table: how its moon windows classify and what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_days: usize,
    pub undated_days: usize,
    pub same_day_windows: usize,
    pub cross_day_windows: usize,
    pub continuations: usize,
    pub moonless_days: usize,
    /// Days whose moon progress falls back to an approximation (0-based)
    pub degraded_days: Vec<usize>,
    /// Days missing sunrise or sunset (0-based)
    pub missing_sun_days: Vec<usize>,
}

impl QualityReport {
    pub fn from_resolver(resolver: &dyn VisibilitySource) -> Self {
        let table = resolver.table();
        let mut report = Self {
            total_days: table.len(),
            ..Self::default()
        };

        for (day, record) in table.records().iter().enumerate() {
            let window = resolver.moon_window(day);
            match window {
                MoonWindow::NoMoon => report.moonless_days += 1,
                MoonWindow::SameDay { .. } => report.same_day_windows += 1,
                MoonWindow::RisesToday { .. } => report.cross_day_windows += 1,
                MoonWindow::ContinuesFromYesterday { .. } => report.continuations += 1,
            }
            if window.is_degraded() {
                report.degraded_days.push(day);
            }
            if !record.sun.is_complete() {
                report.missing_sun_days.push(day);
            }
            if record.date.is_none() {
                report.undated_days += 1;
            }
        }

        report
    }

    /// Returns true if every day resolves without approximation.
    pub fn is_clean(&self) -> bool {
        self.degraded_days.is_empty() && self.missing_sun_days.is_empty()
    }
}

/// Render a day's identity for reports: `day 12 (2024-01-12)` with a 1-based day number.
pub fn describe_day(day: usize, record: Option<&DailyRecord>) -> String {
    match record.and_then(|record| record.date) {
        Some(date) => format!("day {} ({date})", day + 1),
        None => format!("day {}", day + 1),
    }
}
