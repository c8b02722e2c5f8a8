//! Astronomical rise/set tables.
//!
//! This module owns the in-memory representation of a year of sun and moon
//! rise/set times for one location:
//!
//! - [`csv`]: parsing of observatory rise/set CSV exports into per-day rows
//! - [`solar`]: sunrise/sunset synthesis from coordinates when no sun table is available
//!
//! The assembled [`AstroTable`] is loaded once per run and never mutated. Fields
//! are fractional hours of local time in `[0, 24)`; an absent field means no
//! event was recorded that day, which is normal for the moon.

pub mod csv;
pub mod solar;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::Path;

use crate::common::utils::private_path;
use crate::config::{Config, SunSource};

pub use csv::{TableRow, load_rise_set_csv, parse_rise_set_csv};

/// Rise and set hours for one body on one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RiseSet {
    pub rise: Option<f64>,
    pub set: Option<f64>,
}

impl RiseSet {
    pub fn new(rise: Option<f64>, set: Option<f64>) -> Self {
        Self { rise, set }
    }

    /// Both events recorded.
    pub fn is_complete(&self) -> bool {
        self.rise.is_some() && self.set.is_some()
    }

    /// Neither event recorded.
    pub fn is_empty(&self) -> bool {
        self.rise.is_none() && self.set.is_none()
    }
}

/// One calendar day of sun and moon events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyRecord {
    /// Calendar date, when the source table provides one
    pub date: Option<NaiveDate>,
    pub sun: RiseSet,
    pub moon: RiseSet,
}

/// Immutable, day-indexed table of sun and moon events.
///
/// Index 0 is the first row of the source tables (day-of-year 1 for a full
/// calendar-year export).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstroTable {
    records: Vec<DailyRecord>,
}

impl AstroTable {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }

    /// Join two parallel day-indexed sequences into one table.
    ///
    /// The sun row's date wins when both carry one. When the sequences differ in
    /// length the table covers the shorter one.
    pub fn from_parallel(sun: &[TableRow], moon: &[TableRow]) -> Self {
        if sun.len() != moon.len() {
            log_warning!(
                "Sun table has {} days but moon table has {}; using the first {}",
                sun.len(),
                moon.len(),
                sun.len().min(moon.len())
            );
        }

        let records = sun
            .iter()
            .zip(moon.iter())
            .map(|(sun_row, moon_row)| DailyRecord {
                date: sun_row.date.or(moon_row.date),
                sun: sun_row.events,
                moon: moon_row.events,
            })
            .collect();

        Self { records }
    }

    /// Record for a 0-based day index, `None` past either end of the table.
    pub fn record(&self, day: usize) -> Option<&DailyRecord> {
        self.records.get(day)
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Day-of-year for an index: the record's date ordinal, or `day + 1` when undated.
    pub fn day_of_year(&self, day: usize) -> u32 {
        self.record(day)
            .and_then(|record| record.date)
            .map(|date| date.ordinal())
            .unwrap_or(day as u32 + 1)
    }

    /// Index of the row carrying the given date.
    pub fn index_of_date(&self, date: NaiveDate) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.date == Some(date))
    }
}

/// Load the sun and moon tables named by the configuration.
///
/// `sun_override` and `moon_override` replace the configured paths (command
/// line `--sun`/`--moon`). With `sun_source = "computed"` the sun events are
/// synthesized for the moon table's dates instead of read from a file.
pub fn load_table(
    config: &Config,
    sun_override: Option<&Path>,
    moon_override: Option<&Path>,
    debug_enabled: bool,
) -> Result<AstroTable> {
    let moon_path = match moon_override {
        Some(path) => path.to_path_buf(),
        None => config.moon_table_path()?,
    };
    let moon_rows = load_rise_set_csv(&moon_path)?;

    if debug_enabled {
        log_debug!(
            "Loaded {} moon rows from {}",
            moon_rows.len(),
            private_path(&moon_path)
        );
    }

    let sun_rows = match (sun_override, config.sun_source()) {
        (Some(path), _) => load_rise_set_csv(path)?,
        (None, SunSource::Table) => {
            let sun_path = config.sun_table_path()?;
            let rows = load_rise_set_csv(&sun_path)?;
            if debug_enabled {
                log_debug!(
                    "Loaded {} sun rows from {}",
                    rows.len(),
                    private_path(&sun_path)
                );
            }
            rows
        }
        (None, SunSource::Computed) => {
            let dates = moon_rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    row.date.with_context(|| {
                        format!(
                            "Computed sun times need a date on every moon row (row {} has none)",
                            idx + 1
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let events = solar::compute_sun_events(
                config.latitude(),
                config.longitude(),
                config.utc_offset(),
                &dates,
            )?;

            if debug_enabled {
                log_debug!(
                    "Computed sun times for {} days at {:.4}°, {:.4}°",
                    events.len(),
                    config.latitude(),
                    config.longitude()
                );
            }

            dates
                .into_iter()
                .zip(events)
                .map(|(date, events)| TableRow {
                    date: Some(date),
                    events,
                })
                .collect()
        }
    };

    let table = AstroTable::from_parallel(&sun_rows, &moon_rows);
    if table.is_empty() {
        anyhow::bail!("Rise/set tables contain no days");
    }
    Ok(table)
}
