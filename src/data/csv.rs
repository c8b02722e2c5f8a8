//! Rise/set CSV parsing.
//!
//! Observatory exports carry one row per day with a date column and `RISE`,
//! `TRAN.` (transit) and `SET` clock times:
//!
//! ```text
//! YYYY-MM-DD,RISE,TRAN.,SET
//! 2024-01-03,23:17,05:20,
//! 2024-01-04,,06:13,11:14
//! ```
//!
//! Lines before the header row are ignored. Blank cells are genuine "no event"
//! days. Cells that fail to parse as a valid clock time are treated the same way
//! rather than aborting the load.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use super::RiseSet;
use crate::common::utils::{parse_clock_hours, private_path};

/// One parsed CSV row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub date: Option<NaiveDate>,
    pub events: RiseSet,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    date: usize,
    rise: usize,
    set: usize,
}

impl Columns {
    /// Resolve columns from a header line, `None` if it is not a header.
    fn from_header(line: &str) -> Option<Self> {
        let names: Vec<String> = split_fields(line)
            .map(|field| field.to_ascii_uppercase())
            .collect();

        let rise = names.iter().position(|name| name == "RISE")?;
        let set = names.iter().position(|name| name == "SET")?;
        let date = names
            .iter()
            .position(|name| name == "YYYY-MM-DD" || name == "DATE")
            .unwrap_or(0);

        Some(Self { date, rise, set })
    }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|field| field.trim().trim_matches('"'))
}

/// Load and parse a rise/set CSV file.
pub fn load_rise_set_csv(path: &Path) -> Result<Vec<TableRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rise/set table {}", private_path(path)))?;

    parse_rise_set_csv(&content)
        .with_context(|| format!("Failed to parse rise/set table {}", private_path(path)))
}

/// Parse rise/set CSV content.
///
/// Fails only when no header row naming `RISE` and `SET` is found.
pub fn parse_rise_set_csv(content: &str) -> Result<Vec<TableRow>> {
    let mut lines = content
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .filter(|line| !line.trim().is_empty());

    let columns = lines
        .by_ref()
        .find_map(Columns::from_header)
        .context("No header row with RISE and SET columns")?;

    let rows = lines
        .map(|line| {
            let fields: Vec<&str> = split_fields(line).collect();
            let cell = |idx: usize| fields.get(idx).copied().unwrap_or("");

            TableRow {
                date: NaiveDate::parse_from_str(cell(columns.date), "%Y-%m-%d").ok(),
                events: RiseSet {
                    rise: parse_clock_hours(cell(columns.rise)),
                    set: parse_clock_hours(cell(columns.set)),
                },
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOON_SAMPLE: &str = "\
YYYY-MM-DD,RISE,TRAN.,SET
2024-01-02,22:17,04:30,10:37
2024-01-03,23:17,05:20,
2024-01-04,,06:13,11:14
2024-01-05,00:20,07:09,12:01
";

    #[test]
    fn test_parse_sample_rows() {
        let rows = parse_rise_set_csv(MOON_SAMPLE).unwrap();
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert!((rows[0].events.rise.unwrap() - (22.0 + 17.0 / 60.0)).abs() < 1e-9);

        // Blank SET cell is an absent event
        assert!(rows[1].events.rise.is_some());
        assert_eq!(rows[1].events.set, None);

        // Blank RISE cell is an absent event
        assert_eq!(rows[2].events.rise, None);
        assert!((rows[2].events.set.unwrap() - (11.0 + 14.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_transit_column_is_not_mistaken_for_set() {
        let rows = parse_rise_set_csv(MOON_SAMPLE).unwrap();
        // 04:30 is the transit; the set is 10:37
        assert!((rows[0].events.set.unwrap() - (10.0 + 37.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_cells_become_absent() {
        let content = "YYYY-MM-DD,RISE,TRAN.,SET\n2024-13-40,25:10,xx,7:61\n";
        let rows = parse_rise_set_csv(content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].events, RiseSet::default());
    }

    #[test]
    fn test_short_rows_and_preamble() {
        let content = "\u{feff}Hong Kong Observatory\n\nyyyy-mm-dd,rise,tran.,set\n2024-06-21,05:40\n";
        let rows = parse_rise_set_csv(content).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].events.rise.unwrap() - (5.0 + 40.0 / 60.0)).abs() < 1e-9);
        assert_eq!(rows[0].events.set, None);
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let result = parse_rise_set_csv("2024-01-01,07:03,12:30,17:58\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MOON_SAMPLE.as_bytes()).unwrap();

        let rows = load_rise_set_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let error = load_rise_set_csv(&missing).unwrap_err();
        assert!(format!("{error:#}").contains("missing.csv"));
    }
}
