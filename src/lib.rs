//! # Timepixel Library
//!
//! Sun and moon visibility over a year of rise/set tables, for renderers that
//! draw one pixel per (day, hour).
//!
//! ## Architecture
//!
//! - **Data**: `data` loads observatory rise/set CSVs (or computes sun times
//!   from coordinates) into an immutable, day-indexed `AstroTable`
//! - **Resolver**: `resolver` answers "is the sun/moon up on day d at hour h,
//!   and how far along its arc", including moon windows that cross midnight
//! - **Sky**: `sky` classifies twilight bands and computes the lunar phase
//! - **Stats**: `stats` summarizes daylight extremes and table quality
//! - **CLI**: `args` and `commands` expose the library as the `timepixel` binary
//! - **Infrastructure**: `config` (TOML settings), `logger`, `common`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod data;
pub mod resolver;
pub mod sky;
pub mod stats;

pub use data::{AstroTable, DailyRecord, RiseSet};
pub use resolver::{
    MemoizedResolver, MoonWindow, Visibility, VisibilityResolver, VisibilitySource,
    resolve_moon_visibility, resolve_sun_visibility,
};
pub use sky::SkyType;
