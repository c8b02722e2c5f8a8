//! Query command: sun, moon and sky state at one instant.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::{DaySpec, Session, TableOptions, print_json};
use crate::common::utils::{format_clock_hours, format_optional_hours};
use crate::logger::Log;
use crate::resolver::{MoonWindow, Visibility};
use crate::sky::{MoonPhase, PhaseName, Season, SkyType, classify_sky};
use crate::stats::describe_day;

/// Everything known about one instant.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    /// 1-based day number
    pub day: usize,
    pub date: Option<NaiveDate>,
    pub hour: f64,
    pub time: String,
    pub season: Season,
    pub sky: SkyType,
    pub sun_visible: bool,
    pub moon: Visibility,
    pub moon_window: MoonWindow,
    pub moon_phase: Option<MoonPhase>,
    pub moon_phase_name: Option<PhaseName>,
}

impl QueryReport {
    /// Resolve `hour` on the 0-based `day` of an open session.
    pub fn build(session: &Session, day: usize, hour: f64) -> Result<Self> {
        let table = session.table();
        let record = table.record(day).copied().unwrap_or_default();
        let day_of_year = table.day_of_year(day);
        let moon_phase = session.moon_phase(day)?;

        Ok(Self {
            day: day + 1,
            date: record.date,
            hour,
            time: format_clock_hours(hour),
            season: Season::from_day_of_year(day_of_year),
            sky: classify_sky(session.config.latitude(), day_of_year, &record.sun, hour),
            sun_visible: session.resolver.resolve_sun(day, hour),
            moon: session.resolver.resolve_moon(day, hour),
            moon_window: session.resolver.moon_window(day),
            moon_phase,
            moon_phase_name: moon_phase.map(|phase| phase.name()),
        })
    }
}

/// Handle the query command.
///
/// # Arguments
/// * `options` - Table overrides and debug flag
/// * `day` - Day to query
/// * `hour` - Hour of that day in `[0, 24)`
/// * `json` - Output in JSON format
pub fn handle_query_command(
    options: &TableOptions,
    day: DaySpec,
    hour: f64,
    json: bool,
) -> Result<()> {
    if json {
        Log::set_enabled(false);
    } else {
        log_version!();
    }

    let session = Session::open(options)?;
    let index = day.resolve(session.table())?;
    let report = QueryReport::build(&session, index, hour)?;

    if json {
        return print_json(&report);
    }

    let record = session.table().record(index);
    log_block_start!(
        "{} at {} ({})",
        describe_day(index, record),
        report.time,
        report.season
    );
    log_decorated!("Sky: {}", report.sky);

    let sun = record.map(|record| record.sun).unwrap_or_default();
    log_decorated!(
        "Sun: {} (rise {}, set {})",
        if report.sun_visible { "up" } else { "down" },
        format_optional_hours(sun.rise),
        format_optional_hours(sun.set)
    );

    match report.moon.progress {
        Some(progress) => log_decorated!(
            "Moon: up, {:.1}% through its arc ({})",
            progress * 100.0,
            report.moon_window.label()
        ),
        None => log_decorated!("Moon: down ({})", report.moon_window.label()),
    }

    if let (Some(phase), Some(name)) = (report.moon_phase, report.moon_phase_name) {
        log_decorated!(
            "Phase: {}, {:.0}% illuminated, {:.1} days old",
            name,
            phase.illumination * 100.0,
            phase.age_days
        );
    }

    if report.moon_window.is_degraded() {
        log_pipe!();
        log_warning!("Moon progress on this day is approximated");
    }

    log_end!();
    Ok(())
}

/// Display help for the query command.
pub fn display_help() {
    log_version!();
    log_block_start!("query - Sun and moon visibility at one instant");
    log_block_start!("Usage: timepixel query [OPTIONS] <day> <hour>");
    log_block_start!("Arguments:");
    log_indented!("<day>   Day number (1 = first table row) or date YYYY-MM-DD");
    log_indented!("<hour>  Time as HH:MM or fractional hours, 0 <= hour < 24");
    log_block_start!("Options:");
    log_indented!("-j, --json  Output in JSON format");
    log_block_start!("Examples:");
    log_indented!("timepixel query 3 00:00");
    log_indented!("timepixel query 2024-06-21 19.17 --json");
    log_end!();
}
