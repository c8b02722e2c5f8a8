//! Sky condition derived from sun and moon data.
//!
//! - [`twilight`]: sky type for an instant (night, twilight bands, blue and golden hour, day)
//! - [`moon_phase`]: synodic phase and illumination for a date
//!
//! Both feed renderers that pick a sky color and a moon brightness per pixel.

pub mod moon_phase;
pub mod twilight;

use serde::Serialize;
use std::fmt;

pub use moon_phase::{MoonPhase, PhaseName};
pub use twilight::{TwilightBand, TwilightTimes, classify_sky};

/// Sky condition at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyType {
    Night,
    AstronomicalTwilight,
    NauticalTwilight,
    CivilTwilightMorning,
    CivilTwilightEvening,
    BlueHourMorning,
    BlueHourEvening,
    GoldenHour,
    Day,
}

impl SkyType {
    /// Returns true for the two sky types that occur while the sun is up.
    pub fn is_daylight(&self) -> bool {
        matches!(self, Self::Day | Self::GoldenHour)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::AstronomicalTwilight => "astronomical twilight",
            Self::NauticalTwilight => "nautical twilight",
            Self::CivilTwilightMorning => "civil twilight (morning)",
            Self::CivilTwilightEvening => "civil twilight (evening)",
            Self::BlueHourMorning => "blue hour (morning)",
            Self::BlueHourEvening => "blue hour (evening)",
            Self::GoldenHour => "golden hour",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for SkyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Astronomical season (northern hemisphere) by day of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season boundaries fall on the equinoxes and solstices (days 80, 173, 267, 356).
    pub fn from_day_of_year(day_of_year: u32) -> Self {
        match day_of_year {
            0..80 => Self::Winter,
            80..173 => Self::Spring,
            173..267 => Self::Summer,
            267..356 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_boundaries() {
        assert_eq!(Season::from_day_of_year(1), Season::Winter);
        assert_eq!(Season::from_day_of_year(79), Season::Winter);
        assert_eq!(Season::from_day_of_year(80), Season::Spring);
        assert_eq!(Season::from_day_of_year(172), Season::Spring);
        assert_eq!(Season::from_day_of_year(173), Season::Summer);
        assert_eq!(Season::from_day_of_year(267), Season::Autumn);
        assert_eq!(Season::from_day_of_year(355), Season::Autumn);
        assert_eq!(Season::from_day_of_year(356), Season::Winter);
        assert_eq!(Season::from_day_of_year(366), Season::Winter);
    }

    #[test]
    fn test_sky_type_serializes_snake_case() {
        let json = serde_json::to_string(&SkyType::BlueHourEvening).unwrap();
        assert_eq!(json, "\"blue_hour_evening\"");
        assert!(SkyType::GoldenHour.is_daylight());
        assert!(!SkyType::CivilTwilightMorning.is_daylight());
    }
}
