//! Command-line command handlers for timepixel.
//!
//! Each command lives in its own submodule. They share [`TableOptions`] for the
//! command-line overrides, [`Session`] for loading configuration and tables,
//! and the day/hour argument parsers below.

pub mod check;
pub mod day;
pub mod help;
pub mod query;
pub mod stats;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::common::constants::HOURS_PER_DAY;
use crate::common::utils::parse_clock_hours;
use crate::config::Config;
use crate::data::{self, AstroTable};
use crate::resolver::{MemoizedResolver, VisibilityResolver, VisibilitySource};
use crate::sky::MoonPhase;
use crate::stats::describe_day;

/// Options shared by every command that reads the tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
    pub debug_enabled: bool,
    /// `--sun <csv>` override of the configured sun table
    pub sun_table: Option<String>,
    /// `--moon <csv>` override of the configured moon table
    pub moon_table: Option<String>,
}

/// A day named on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaySpec {
    /// 1-based day number within the table
    Number(usize),
    Date(NaiveDate),
}

impl DaySpec {
    /// Parse `N` (1-based day number) or `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Ok(number) = value.parse::<usize>() {
            if number == 0 {
                anyhow::bail!("Day numbers start at 1");
            }
            return Ok(Self::Number(number));
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self::Date)
            .with_context(|| format!("Invalid day '{value}': use a day number or YYYY-MM-DD"))
    }

    /// 0-based table index for this day.
    pub fn resolve(&self, table: &AstroTable) -> Result<usize> {
        match *self {
            Self::Number(number) if number <= table.len() => Ok(number - 1),
            Self::Number(number) => {
                anyhow::bail!(
                    "Day {} is outside the table (1-{})",
                    number,
                    table.len()
                )
            }
            Self::Date(date) => table
                .index_of_date(date)
                .with_context(|| format!("Date {date} is not in the table")),
        }
    }
}

/// Parse a query hour given as `HH:MM` or fractional hours, rejecting values outside `[0, 24)`.
pub fn parse_query_hour(value: &str) -> Result<f64> {
    let hour = if value.contains(':') {
        parse_clock_hours(value).with_context(|| format!("Invalid time '{value}': use HH:MM"))?
    } else {
        value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Invalid hour '{value}'"))?
    };

    if !(0.0..HOURS_PER_DAY).contains(&hour) {
        anyhow::bail!("Hour must be in [0, 24) (got {hour})");
    }
    Ok(hour)
}

/// Loaded configuration and a resolver over its tables.
pub struct Session {
    pub config: Config,
    pub resolver: Box<dyn VisibilitySource>,
}

impl Session {
    /// Load configuration and tables, honoring the command-line overrides.
    ///
    /// Logs one warning when some days can only be resolved approximately.
    pub fn open(options: &TableOptions) -> Result<Self> {
        let config = Config::load()?;

        if options.debug_enabled {
            config.log_config();
        }

        let table = data::load_table(
            &config,
            options.sun_table.as_deref().map(Path::new),
            options.moon_table.as_deref().map(Path::new),
            options.debug_enabled,
        )?;

        let resolver = VisibilityResolver::new(table);
        warn_degraded_days(&resolver);

        let resolver: Box<dyn VisibilitySource> = if config.memoize() {
            Box::new(MemoizedResolver::new(resolver))
        } else {
            Box::new(resolver)
        };

        Ok(Self { config, resolver })
    }

    pub fn table(&self) -> &AstroTable {
        self.resolver.table()
    }

    /// Moon phase at the start of `day`, when the table row is dated.
    pub fn moon_phase(&self, day: usize) -> Result<Option<MoonPhase>> {
        let Some(date) = self.table().record(day).and_then(|record| record.date) else {
            return Ok(None);
        };
        let reference = self.config.reference_new_moon()?;
        Ok(Some(MoonPhase::on_date(reference, date)))
    }
}

fn warn_degraded_days(resolver: &VisibilityResolver) {
    let degraded = resolver.degraded_days();
    let Some(&first) = degraded.first() else {
        return;
    };

    log_pipe!();
    log_warning!(
        "{} day(s) have a moonrise or moonset without a recorded partner",
        degraded.len()
    );
    log_indented!(
        "Moon progress is approximated on those days, first: {}",
        describe_day(first, resolver.table().record(first))
    );
}

/// Print a serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
