//! Stats command: seasonal daylight extremes and data quality of the tables.

use anyhow::Result;
use serde::Serialize;

use super::{Session, TableOptions, print_json};
use crate::common::utils::format_clock_hours;
use crate::data::AstroTable;
use crate::logger::Log;
use crate::stats::{DayExtreme, QualityReport, SeasonalStats, describe_day};

#[derive(Debug, Clone, Serialize)]
struct StatsOutput {
    seasonal: SeasonalStats,
    quality: QualityReport,
}

/// Handle the stats command.
pub fn handle_stats_command(options: &TableOptions, json: bool) -> Result<()> {
    if json {
        Log::set_enabled(false);
    } else {
        log_version!();
    }

    let session = Session::open(options)?;
    let seasonal = SeasonalStats::from_table(session.table());
    let quality = QualityReport::from_resolver(session.resolver.as_ref());

    if json {
        return print_json(&StatsOutput { seasonal, quality });
    }

    let table = session.table();
    log_block_start!("Daylight across {} days:", table.len());
    match seasonal.average_daylight {
        Some(average) => log_indented!("Average daylight: {}", format_duration_hours(average)),
        None => log_indented!("No day has both sunrise and sunset"),
    }
    log_extreme(table, "Shortest day", seasonal.shortest_day, true);
    log_extreme(table, "Longest day", seasonal.longest_day, true);
    log_extreme(table, "Earliest sunrise", seasonal.earliest_sunrise, false);
    log_extreme(table, "Latest sunrise", seasonal.latest_sunrise, false);
    log_extreme(table, "Earliest sunset", seasonal.earliest_sunset, false);
    log_extreme(table, "Latest sunset", seasonal.latest_sunset, false);

    log_quality(table, &quality);

    log_end!();
    Ok(())
}

/// Log the moon window breakdown and any gaps.
pub(crate) fn log_quality(table: &AstroTable, quality: &QualityReport) {
    log_block_start!("Moon windows:");
    log_indented!("Same day:      {}", quality.same_day_windows);
    log_indented!("Cross-day:     {}", quality.cross_day_windows);
    log_indented!("Continuations: {}", quality.continuations);
    log_indented!("No moon:       {}", quality.moonless_days);

    if !quality.degraded_days.is_empty() {
        log_pipe!();
        log_warning!(
            "{} day(s) resolve moon progress approximately:",
            quality.degraded_days.len()
        );
        for &day in &quality.degraded_days {
            log_indented!("{}", describe_day(day, table.record(day)));
        }
    }

    if !quality.missing_sun_days.is_empty() {
        log_pipe!();
        log_warning!(
            "{} day(s) are missing sunrise or sunset; the sun counts as down all day",
            quality.missing_sun_days.len()
        );
    }
}

fn log_extreme(table: &AstroTable, label: &str, extreme: Option<DayExtreme>, is_duration: bool) {
    let Some(extreme) = extreme else {
        return;
    };
    let value = if is_duration {
        format_duration_hours(extreme.hours)
    } else {
        format_clock_hours(extreme.hours)
    };
    log_indented!(
        "{}: {} on {}",
        label,
        value,
        describe_day(extreme.day, table.record(extreme.day))
    );
}

/// Format a duration in hours as `10h 32m`.
fn format_duration_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

/// Display help for the stats command.
pub fn display_help() {
    log_version!();
    log_block_start!("stats - Seasonal statistics for the loaded tables");
    log_block_start!("Usage: timepixel stats [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-j, --json  Output in JSON format");
    log_block_start!("Reports:");
    log_indented!("Shortest and longest day, earliest and latest sunrise and sunset,");
    log_indented!("and how the moon windows of each day classify.");
    log_end!();
}
