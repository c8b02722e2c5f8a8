//! Application-wide constants: configuration defaults, validation limits and
//! astronomical parameters.

// # Configuration defaults

pub const CONFIG_DIR_NAME: &str = "timepixel";
pub const CONFIG_FILE_NAME: &str = "timepixel.toml";

/// Default sun rise/set table. Relative table paths resolve against the
/// directory of the configuration file, or the working directory without one.
pub const DEFAULT_SUN_TABLE: &str = "data/hongkong_sunrise_sunset_2024_clean.csv";
pub const DEFAULT_MOON_TABLE: &str = "data/moonrise_moonset_2024_clean.csv";
pub const DEFAULT_SUN_SOURCE: crate::config::SunSource = crate::config::SunSource::Table;

/// Hong Kong Observatory coordinates, the location the default tables describe.
pub const DEFAULT_LATITUDE: f64 = 22.3;
pub const DEFAULT_LONGITUDE: f64 = 114.2;
/// Hours east of UTC for the table's local time (Hong Kong Time).
pub const DEFAULT_UTC_OFFSET: f64 = 8.0;

/// New moon used as the phase reference (UTC).
pub const DEFAULT_REFERENCE_NEW_MOON: &str = "2024-01-11 11:57:00";
pub const REFERENCE_NEW_MOON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_MEMOIZE: bool = true;

/// Minutes between rows of the `day` timeline.
pub const DEFAULT_TIMELINE_STEP_MINUTES: u32 = 60;
pub const MINIMUM_TIMELINE_STEP_MINUTES: u32 = 1;
pub const MAXIMUM_TIMELINE_STEP_MINUTES: u32 = 720;

// # Validation limits

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;
pub const MINIMUM_UTC_OFFSET: f64 = -12.0;
pub const MAXIMUM_UTC_OFFSET: f64 = 14.0;

// # Astronomy

pub const HOURS_PER_DAY: f64 = 24.0;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588861;

/// Assumed set hour on the following day when a moonrise has no recorded
/// partner set. Only used to scale progress, never to extend visibility.
pub const FALLBACK_MOONSET_HOUR: f64 = 8.0;

/// Sun elevation thresholds in degrees.
pub const GOLDEN_HOUR_ELEVATION: f64 = 6.0;
pub const BLUE_HOUR_ELEVATION: f64 = -4.0;
pub const CIVIL_TWILIGHT_ELEVATION: f64 = -6.0;
pub const NAUTICAL_TWILIGHT_ELEVATION: f64 = -12.0;
pub const ASTRONOMICAL_TWILIGHT_ELEVATION: f64 = -18.0;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
