//! Per-day moon visibility windows.
//!
//! Rise/set tables file each event under the calendar day it happens on, and
//! the lunar day is about 24h50m, so a moonrise often pairs with a moonset
//! recorded on the following day. [`MoonWindow`] makes that pairing explicit
//! once per day instead of inferring it from the sign of `rise - set` at query
//! time.

use serde::Serialize;

use crate::data::{AstroTable, RiseSet};

/// The moon's visibility window as seen from one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoonWindow {
    /// No moonrise or moonset recorded this day.
    NoMoon,

    /// Rise and set both fall on this day, rise first.
    SameDay { rise: f64, set: f64 },

    /// The moon rises this day and sets on the following day.
    RisesToday {
        rise: f64,
        /// Set hour on the following day, `None` when no partner set is recorded
        continues_to: Option<f64>,
    },

    /// The moon rose on the previous day and sets this day.
    ContinuesFromYesterday {
        set: f64,
        /// Rise hour on the previous day, `None` when no partner rise is recorded
        started_at: Option<f64>,
    },
}

impl MoonWindow {
    /// Classify a day's moon events given its neighbours.
    ///
    /// - both events with `rise < set`: [`MoonWindow::SameDay`]
    /// - both events with `rise >= set`: the recorded set belongs to the next
    ///   day, so this is [`MoonWindow::RisesToday`]. A lone set on the next day
    ///   takes precedence as the partner.
    /// - only a rise: [`MoonWindow::RisesToday`], partnered with the next day's
    ///   set unless that set closes a same-day window of its own
    /// - only a set: [`MoonWindow::ContinuesFromYesterday`], partnered with the
    ///   previous day's rise unless that rise already set the same day
    pub fn classify(previous: Option<&RiseSet>, today: &RiseSet, next: Option<&RiseSet>) -> Self {
        match (today.rise, today.set) {
            (None, None) => Self::NoMoon,
            (Some(rise), Some(set)) if rise < set => Self::SameDay { rise, set },
            (Some(rise), Some(set)) => Self::RisesToday {
                rise,
                continues_to: Some(lone_set(next).unwrap_or(set)),
            },
            (Some(rise), None) => Self::RisesToday {
                rise,
                continues_to: partner_set(next),
            },
            (None, Some(set)) => Self::ContinuesFromYesterday {
                set,
                started_at: unpaired_rise(previous),
            },
        }
    }

    /// Classify table day `day`, `NoMoon` past the end of the table.
    pub fn for_day(table: &AstroTable, day: usize) -> Self {
        let Some(today) = table.record(day) else {
            return Self::NoMoon;
        };
        let previous = day
            .checked_sub(1)
            .and_then(|prev| table.record(prev))
            .map(|record| &record.moon);
        let next = table.record(day + 1).map(|record| &record.moon);

        Self::classify(previous, &today.moon, next)
    }

    /// Returns true if the window spills over into the following day.
    pub fn crosses_midnight(&self) -> bool {
        matches!(self, Self::RisesToday { .. })
    }

    /// Returns true if progress for part of this window can only be approximated.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Self::RisesToday {
                continues_to: None,
                ..
            } | Self::ContinuesFromYesterday {
                started_at: None,
                ..
            }
        )
    }

    /// Short label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoMoon => "no moon",
            Self::SameDay { .. } => "same day",
            Self::RisesToday { .. } => "rises today",
            Self::ContinuesFromYesterday { .. } => "continues",
        }
    }
}

/// The next day's set when it has no rise of its own.
fn lone_set(next: Option<&RiseSet>) -> Option<f64> {
    next.filter(|events| events.rise.is_none())
        .and_then(|events| events.set)
}

/// The next day's set unless it closes that day's own same-day window.
fn partner_set(next: Option<&RiseSet>) -> Option<f64> {
    let events = next?;
    match (events.rise, events.set) {
        (Some(rise), Some(set)) if rise < set => None,
        (_, set) => set,
    }
}

/// The previous day's rise unless it set again that same day.
fn unpaired_rise(previous: Option<&RiseSet>) -> Option<f64> {
    let events = previous?;
    match (events.rise, events.set) {
        (Some(rise), Some(set)) if rise < set => None,
        (rise, _) => rise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(rise: Option<f64>, set: Option<f64>) -> RiseSet {
        RiseSet::new(rise, set)
    }

    #[test]
    fn test_classify_no_moon() {
        assert_eq!(
            MoonWindow::classify(None, &events(None, None), None),
            MoonWindow::NoMoon
        );
    }

    #[test]
    fn test_classify_same_day() {
        let window = MoonWindow::classify(None, &events(Some(2.0), Some(10.0)), None);
        assert_eq!(window, MoonWindow::SameDay { rise: 2.0, set: 10.0 });
        assert!(!window.crosses_midnight());
    }

    #[test]
    fn test_classify_both_with_later_rise_uses_own_set() {
        let next = events(Some(23.9), Some(12.0));
        let window = MoonWindow::classify(None, &events(Some(22.0), Some(10.0)), Some(&next));
        assert_eq!(
            window,
            MoonWindow::RisesToday {
                rise: 22.0,
                continues_to: Some(10.0)
            }
        );
    }

    #[test]
    fn test_classify_both_with_later_rise_prefers_lone_next_set() {
        let next = events(None, Some(11.0));
        let window = MoonWindow::classify(None, &events(Some(22.0), Some(10.0)), Some(&next));
        assert_eq!(
            window,
            MoonWindow::RisesToday {
                rise: 22.0,
                continues_to: Some(11.0)
            }
        );
    }

    #[test]
    fn test_classify_equal_rise_and_set_crosses_midnight() {
        let window = MoonWindow::classify(None, &events(Some(12.0), Some(12.0)), None);
        assert!(window.crosses_midnight());
    }

    #[test]
    fn test_classify_rise_only() {
        let next = events(None, Some(11.233));
        let window = MoonWindow::classify(None, &events(Some(23.283), None), Some(&next));
        assert_eq!(
            window,
            MoonWindow::RisesToday {
                rise: 23.283,
                continues_to: Some(11.233)
            }
        );

        // Next day's set closes its own window, so nothing pairs with this rise
        let next = events(Some(1.0), Some(9.0));
        let window = MoonWindow::classify(None, &events(Some(23.283), None), Some(&next));
        assert!(window.is_degraded());

        // Last day of the table
        let window = MoonWindow::classify(None, &events(Some(23.283), None), None);
        assert!(window.is_degraded());
    }

    #[test]
    fn test_classify_set_only() {
        let previous = events(Some(23.283), None);
        let window = MoonWindow::classify(Some(&previous), &events(None, Some(11.233)), None);
        assert_eq!(
            window,
            MoonWindow::ContinuesFromYesterday {
                set: 11.233,
                started_at: Some(23.283)
            }
        );
        assert!(!window.is_degraded());

        // Previous rise set the same day: no partner
        let previous = events(Some(1.0), Some(12.0));
        let window = MoonWindow::classify(Some(&previous), &events(None, Some(11.233)), None);
        assert!(window.is_degraded());

        // First day of the table
        let window = MoonWindow::classify(None, &events(None, Some(11.233)), None);
        assert!(window.is_degraded());
    }

    #[test]
    fn test_for_day_out_of_range() {
        let table = AstroTable::default();
        assert_eq!(MoonWindow::for_day(&table, 5), MoonWindow::NoMoon);
    }
}
