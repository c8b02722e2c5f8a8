//! Lunar phase from the mean synodic month.
//!
//! Phase is measured from a reference new moon, so accuracy drifts by a few
//! hours over a year. That is plenty for choosing a moon brightness.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::f64::consts::TAU;
use std::fmt;

use crate::common::constants::SYNODIC_MONTH_DAYS;

/// Phase of the moon at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhase {
    /// Days since the most recent new moon
    pub age_days: f64,
    /// Fraction of the synodic month, 0.0 new and 0.5 full
    pub phase: f64,
    /// Illuminated fraction of the disc
    pub illumination: f64,
}

impl MoonPhase {
    pub fn at(reference_new_moon: NaiveDateTime, instant: NaiveDateTime) -> Self {
        let elapsed = instant - reference_new_moon;
        let elapsed_days = elapsed.num_seconds() as f64 / 86_400.0;
        let age_days = elapsed_days.rem_euclid(SYNODIC_MONTH_DAYS);
        let phase = age_days / SYNODIC_MONTH_DAYS;

        Self {
            age_days,
            phase,
            illumination: (1.0 - (TAU * phase).cos()) / 2.0,
        }
    }

    /// Phase at local midnight starting `date`.
    pub fn on_date(reference_new_moon: NaiveDateTime, date: NaiveDate) -> Self {
        Self::at(reference_new_moon, date.and_time(NaiveTime::MIN))
    }

    pub fn is_waxing(&self) -> bool {
        self.phase < 0.5
    }

    pub fn name(&self) -> PhaseName {
        let waxing = self.is_waxing();
        match self.illumination {
            i if i < 0.05 => PhaseName::NewMoon,
            i if i < 0.25 && waxing => PhaseName::WaxingCrescent,
            i if i < 0.25 => PhaseName::WaningCrescent,
            i if i < 0.75 && waxing => PhaseName::FirstQuarter,
            i if i < 0.75 => PhaseName::LastQuarter,
            i if i < 0.95 && waxing => PhaseName::WaxingGibbous,
            i if i < 0.95 => PhaseName::WaningGibbous,
            _ => PhaseName::FullMoon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        };
        f.write_str(name)
    }
}
