//! Configuration system for timepixel.
//!
//! Settings live in `timepixel.toml`, searched in order:
//! 1. the directory passed with `--config <dir>`
//! 2. **XDG_CONFIG_HOME**/timepixel/timepixel.toml
//!
//! A missing file in the default location is not an error: every key is
//! optional and falls back to the Hong Kong 2024 defaults.
//!
//! ```toml
//! #[Tables]
//! sun_table = "data/hongkong_sunrise_sunset_2024_clean.csv"
//! moon_table = "data/moonrise_moonset_2024_clean.csv"
//! sun_source = "table"           # "table" or "computed" (from coordinates)
//!
//! #[Location]
//! latitude = 22.3                # -90 to 90 degrees
//! longitude = 114.2              # -180 to 180 degrees
//! utc_offset = 8.0               # Table local time, hours east of UTC (-12 to 14)
//!
//! #[Moon]
//! reference_new_moon = "2024-01-11 11:57:00"
//!
//! #[Resolver]
//! memoize = true                 # Cache repeated (day, hour) moon lookups
//! ```
//!
//! Relative table paths resolve against the directory holding the loaded
//! configuration file. `~/` expands to the home directory.

pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::constants::*;
use crate::common::utils::private_path;

pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Where sunrise and sunset times come from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SunSource {
    /// Read from the `sun_table` CSV.
    Table,
    /// Computed from `latitude`/`longitude` for each date of the moon table.
    Computed,
}

impl SunSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunSource::Table => "table",
            SunSource::Computed => "computed",
        }
    }
}

/// Settings loaded from `timepixel.toml`.
///
/// Every field is optional; the accessor methods apply the `DEFAULT_*`
/// constants from [`crate::common::constants`].
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub sun_table: Option<String>,
    pub moon_table: Option<String>,
    pub sun_source: Option<SunSource>,

    /// Observer latitude in degrees, used by computed sun times and twilight bands
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Offset of the tables' local time from UTC, in hours
    pub utc_offset: Option<f64>,

    /// New moon instant (`YYYY-MM-DD HH:MM:SS`) the phase is measured from
    pub reference_new_moon: Option<String>,

    pub memoize: Option<bool>,

    /// File this configuration was read from, `None` for defaults
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        load()
    }

    /// Load configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    /// The file this configuration came from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn sun_source(&self) -> SunSource {
        self.sun_source.unwrap_or(DEFAULT_SUN_SOURCE)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    pub fn utc_offset(&self) -> f64 {
        self.utc_offset.unwrap_or(DEFAULT_UTC_OFFSET)
    }

    pub fn memoize(&self) -> bool {
        self.memoize.unwrap_or(DEFAULT_MEMOIZE)
    }

    /// Parsed reference new moon.
    pub fn reference_new_moon(&self) -> Result<NaiveDateTime> {
        let value = self
            .reference_new_moon
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_NEW_MOON);
        parse_reference_new_moon(value)
    }

    /// Resolved path of the sun rise/set table.
    pub fn sun_table_path(&self) -> Result<PathBuf> {
        self.resolve_path(self.sun_table.as_deref().unwrap_or(DEFAULT_SUN_TABLE))
    }

    /// Resolved path of the moon rise/set table.
    pub fn moon_table_path(&self) -> Result<PathBuf> {
        self.resolve_path(self.moon_table.as_deref().unwrap_or(DEFAULT_MOON_TABLE))
    }

    fn resolve_path(&self, value: &str) -> Result<PathBuf> {
        let path = if let Some(rest) = value.strip_prefix("~/") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(rest)
        } else {
            PathBuf::from(value)
        };

        if path.is_absolute() {
            return Ok(path);
        }

        match self.source.as_deref().and_then(Path::parent) {
            Some(base_dir) => Ok(base_dir.join(path)),
            None => Ok(path),
        }
    }

    pub fn log_config(&self) {
        match self.source() {
            Some(path) => log_block_start!("Loaded configuration from {}", private_path(path)),
            None => log_block_start!("No configuration file found, using defaults"),
        }

        if let Ok(moon_path) = self.moon_table_path() {
            log_indented!("Moon table: {}", private_path(&moon_path));
        }

        match self.sun_source() {
            SunSource::Table => {
                if let Ok(sun_path) = self.sun_table_path() {
                    log_indented!("Sun table: {}", private_path(&sun_path));
                }
            }
            SunSource::Computed => {
                log_indented!("Sun times: computed from coordinates");
            }
        }

        let lat = self.latitude();
        let lon = self.longitude();
        let lat_dir = if lat >= 0.0 { "N" } else { "S" };
        let lon_dir = if lon >= 0.0 { "E" } else { "W" };
        log_indented!(
            "Location: {:.3}°{}, {:.3}°{} (UTC{:+})",
            lat.abs(),
            lat_dir,
            lon.abs(),
            lon_dir,
            self.utc_offset()
        );

        log_indented!(
            "Memoization: {}",
            if self.memoize() { "enabled" } else { "disabled" }
        );
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` reference instant.
pub(crate) fn parse_reference_new_moon(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), REFERENCE_NEW_MOON_FORMAT).with_context(|| {
        format!("reference_new_moon must use the format YYYY-MM-DD HH:MM:SS (got '{value}')")
    })
}
