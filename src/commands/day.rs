//! Day command: timeline of one day sampled at a fixed step.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::{DaySpec, Session, TableOptions, print_json};
use crate::common::constants::HOURS_PER_DAY;
use crate::common::utils::{format_clock_hours, format_optional_hours};
use crate::data::RiseSet;
use crate::logger::Log;
use crate::resolver::{MoonWindow, Visibility};
use crate::sky::{MoonPhase, PhaseName, Season, SkyType, TwilightTimes};
use crate::stats::describe_day;

/// One timeline sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    pub hour: f64,
    pub sky: SkyType,
    pub sun_visible: bool,
    pub moon: Visibility,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    /// 1-based day number
    pub day: usize,
    pub date: Option<NaiveDate>,
    pub season: Season,
    pub sun: RiseSet,
    pub moon: RiseSet,
    pub moon_window: MoonWindow,
    pub twilight: Option<TwilightTimes>,
    pub moon_phase: Option<MoonPhase>,
    pub moon_phase_name: Option<PhaseName>,
    pub samples: Vec<Sample>,
}

impl DayReport {
    /// Sample the 0-based `day` every `step_minutes`, starting at midnight.
    pub fn build(session: &Session, day: usize, step_minutes: u32) -> Result<Self> {
        let table = session.table();
        let record = table.record(day).copied().unwrap_or_default();
        let day_of_year = table.day_of_year(day);
        let latitude = session.config.latitude();

        let twilight = match (record.sun.rise, record.sun.set) {
            (Some(sunrise), Some(sunset)) => Some(TwilightTimes::compute(
                latitude,
                day_of_year,
                sunrise,
                sunset,
            )),
            _ => None,
        };

        let samples = sample_hours(step_minutes)
            .map(|hour| Sample {
                hour,
                sky: twilight.map_or(SkyType::Night, |times| times.classify(hour)),
                sun_visible: session.resolver.resolve_sun(day, hour),
                moon: session.resolver.resolve_moon(day, hour),
            })
            .collect();

        let moon_phase = session.moon_phase(day)?;

        Ok(Self {
            day: day + 1,
            date: record.date,
            season: Season::from_day_of_year(day_of_year),
            sun: record.sun,
            moon: record.moon,
            moon_window: session.resolver.moon_window(day),
            twilight,
            moon_phase,
            moon_phase_name: moon_phase.map(|phase| phase.name()),
            samples,
        })
    }
}

/// Sample hours `0, step, 2*step, ...` below 24.
pub fn sample_hours(step_minutes: u32) -> impl Iterator<Item = f64> {
    let step = step_minutes.max(1);
    (0..)
        .map(move |index: u32| (index * step) as f64 / 60.0)
        .take_while(|hour| *hour < HOURS_PER_DAY)
}

/// Handle the day command.
///
/// # Arguments
/// * `options` - Table overrides and debug flag
/// * `day` - Day to sample
/// * `step_minutes` - Minutes between samples
/// * `json` - Output in JSON format
pub fn handle_day_command(
    options: &TableOptions,
    day: DaySpec,
    step_minutes: u32,
    json: bool,
) -> Result<()> {
    if json {
        Log::set_enabled(false);
    } else {
        log_version!();
    }

    let session = Session::open(options)?;
    let index = day.resolve(session.table())?;
    let report = DayReport::build(&session, index, step_minutes)?;

    if json {
        return print_json(&report);
    }

    log_block_start!(
        "{} ({})",
        describe_day(index, session.table().record(index)),
        report.season
    );
    log_indented!(
        "Sun: rise {}, set {}",
        format_optional_hours(report.sun.rise),
        format_optional_hours(report.sun.set)
    );
    log_indented!(
        "Moon: rise {}, set {} ({})",
        format_optional_hours(report.moon.rise),
        format_optional_hours(report.moon.set),
        report.moon_window.label()
    );
    if let Some(name) = report.moon_phase_name {
        log_indented!("Phase: {}", name);
    }

    log_block_start!("Timeline:");
    for sample in &report.samples {
        let moon = match sample.moon.progress {
            Some(progress) => format!("moon {:>5.1}%", progress * 100.0),
            None => "           ".to_string(),
        };
        log_indented!(
            "{}  {}  {}  {}",
            format_clock_hours(sample.hour),
            if sample.sun_visible { "sun" } else { "   " },
            moon,
            sample.sky
        );
    }

    log_end!();
    Ok(())
}

/// Display help for the day command.
pub fn display_help() {
    log_version!();
    log_block_start!("day - Timeline of sun, moon and sky for one day");
    log_block_start!("Usage: timepixel day [OPTIONS] <day>");
    log_block_start!("Arguments:");
    log_indented!("<day>  Day number (1 = first table row) or date YYYY-MM-DD");
    log_block_start!("Options:");
    log_indented!("-s, --step <minutes>  Minutes between samples (1-720, default 60)");
    log_indented!("-j, --json            Output in JSON format");
    log_end!();
}
