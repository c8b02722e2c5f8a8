//! Twilight band boundaries and sky classification.
//!
//! Band edges are estimated from the approximate solar declination for the day
//! of year and the observer's latitude. Solar noon is taken as the midpoint of
//! the table's sunrise and sunset, which keeps the bands aligned with the sun
//! visibility used everywhere else even when the table and the declination
//! model disagree by a few minutes.

use serde::Serialize;
use std::f64::consts::PI;

use super::SkyType;
use crate::common::constants::{
    ASTRONOMICAL_TWILIGHT_ELEVATION, BLUE_HOUR_ELEVATION, CIVIL_TWILIGHT_ELEVATION,
    GOLDEN_HOUR_ELEVATION, NAUTICAL_TWILIGHT_ELEVATION,
};
use crate::data::RiseSet;

/// Morning and evening boundary of one band, in hours of the day.
///
/// For twilight bands `morning` is when the band begins and `evening` when it
/// ends. For the golden hour `morning` is when it ends (the sun climbs past the
/// threshold) and `evening` when it begins again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwilightBand {
    pub morning: f64,
    pub evening: f64,
}

/// All band boundaries for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwilightTimes {
    pub sunrise: f64,
    pub sunset: f64,
    pub golden_hour: TwilightBand,
    pub blue_hour: TwilightBand,
    pub civil: TwilightBand,
    pub nautical: TwilightBand,
    pub astronomical: TwilightBand,
}

impl TwilightTimes {
    /// Compute band boundaries for a day with known sunrise and sunset.
    pub fn compute(latitude: f64, day_of_year: u32, sunrise: f64, sunset: f64) -> Self {
        let declination = solar_declination(day_of_year);
        let solar_noon = (sunrise + sunset) / 2.0;

        let band = |elevation: f64| {
            let offset = hours_from_noon(latitude, declination, elevation);
            TwilightBand {
                morning: solar_noon - offset,
                evening: solar_noon + offset,
            }
        };

        Self {
            sunrise,
            sunset,
            golden_hour: band(GOLDEN_HOUR_ELEVATION),
            blue_hour: band(BLUE_HOUR_ELEVATION),
            civil: band(CIVIL_TWILIGHT_ELEVATION),
            nautical: band(NAUTICAL_TWILIGHT_ELEVATION),
            astronomical: band(ASTRONOMICAL_TWILIGHT_ELEVATION),
        }
    }

    /// Sky type at `hour`.
    ///
    /// Inside `[sunrise, sunset]` the sky is `Day` or `GoldenHour`. Before
    /// sunrise the bands are checked from the brightest outward, and likewise
    /// after sunset.
    pub fn classify(&self, hour: f64) -> SkyType {
        if self.sunrise <= hour && hour <= self.sunset {
            if hour <= self.golden_hour.morning || hour >= self.golden_hour.evening {
                return SkyType::GoldenHour;
            }
            return SkyType::Day;
        }

        if hour < self.sunrise {
            if hour >= self.blue_hour.morning {
                SkyType::BlueHourMorning
            } else if hour >= self.civil.morning {
                SkyType::CivilTwilightMorning
            } else if hour >= self.nautical.morning {
                SkyType::NauticalTwilight
            } else if hour >= self.astronomical.morning {
                SkyType::AstronomicalTwilight
            } else {
                SkyType::Night
            }
        } else if hour <= self.blue_hour.evening {
            SkyType::BlueHourEvening
        } else if hour <= self.civil.evening {
            SkyType::CivilTwilightEvening
        } else if hour <= self.nautical.evening {
            SkyType::NauticalTwilight
        } else if hour <= self.astronomical.evening {
            SkyType::AstronomicalTwilight
        } else {
            SkyType::Night
        }
    }
}

/// Sky type for one day's sun events; `Night` when either event is missing.
pub fn classify_sky(latitude: f64, day_of_year: u32, sun: &RiseSet, hour: f64) -> SkyType {
    match (sun.rise, sun.set) {
        (Some(sunrise), Some(sunset)) => {
            TwilightTimes::compute(latitude, day_of_year, sunrise, sunset).classify(hour)
        }
        _ => SkyType::Night,
    }
}

/// Approximate solar declination in radians.
fn solar_declination(day_of_year: u32) -> f64 {
    let angle = (360.0 * (284.0 + day_of_year as f64) / 365.0).to_radians();
    (23.45 * angle.sin()).to_radians()
}

/// Hours between solar noon and the moment the sun crosses `elevation` degrees.
///
/// Zero when the sun never climbs above the elevation, twelve when it never
/// drops below it.
fn hours_from_noon(latitude: f64, declination: f64, elevation: f64) -> f64 {
    let lat = latitude.to_radians();
    let denominator = lat.cos() * declination.cos();
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }

    let cos_hour_angle = (elevation.to_radians().sin() - lat.sin() * declination.sin()) / denominator;
    cos_hour_angle.clamp(-1.0, 1.0).acos() * 12.0 / PI
}
