//! Sun and moon visibility resolution.
//!
//! Given a day index and an hour of that day, the resolver answers whether the
//! sun or moon is above the horizon and how far along its visible arc it is
//! (`0.0` just risen, `1.0` about to set). Renderers map that pair onto pixel
//! colors or screen positions.
//!
//! ## Moon windows across midnight
//!
//! A moon window that starts on day `d` and ends on day `d + 1` is resolved in
//! two halves: day `d` only reports the part after the rise, and day `d + 1`
//! reports the part up to the set, with progress measured over the whole window.
//! Progress therefore increases monotonically through midnight and reaches `1.0`
//! exactly at the set instant.
//!
//! Query hours are expected in `[0, 24)`; rejecting anything else is the
//! caller's job.

pub mod memo;
pub mod window;

use serde::Serialize;

use crate::common::constants::{FALLBACK_MOONSET_HOUR, HOURS_PER_DAY};
use crate::data::AstroTable;

pub use memo::MemoizedResolver;
pub use window::MoonWindow;

/// Visibility of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    pub visible: bool,
    /// Fraction of the visible arc already travelled, `None` when not visible
    pub progress: Option<f64>,
}

impl Visibility {
    pub const HIDDEN: Self = Self {
        visible: false,
        progress: None,
    };

    pub fn at(progress: f64) -> Self {
        Self {
            visible: true,
            progress: Some(progress.clamp(0.0, 1.0)),
        }
    }
}

/// Common interface of the plain and memoizing resolvers.
pub trait VisibilitySource {
    /// The table being resolved against.
    fn table(&self) -> &AstroTable;

    /// Whether the sun is up on `day` at `hour`.
    fn resolve_sun(&self, day: usize, hour: f64) -> bool;

    /// Moon visibility and arc progress on `day` at `hour`.
    ///
    /// A day recording both events with the rise last measures its window up
    /// to the following day's set when that day records a set and no rise,
    /// rather than up to its own recorded set. The window then ends where the
    /// next day's continuation ends, so progress stays continuous and reaches
    /// `1.0` at that set.
    fn resolve_moon(&self, day: usize, hour: f64) -> Visibility;

    /// Moon window classification for `day`.
    fn moon_window(&self, day: usize) -> MoonWindow;
}

/// Resolves visibility against an owned, immutable table.
///
/// Moon windows are classified once at construction.
#[derive(Debug, Clone)]
pub struct VisibilityResolver {
    table: AstroTable,
    windows: Vec<MoonWindow>,
}

impl VisibilityResolver {
    pub fn new(table: AstroTable) -> Self {
        let windows = (0..table.len())
            .map(|day| MoonWindow::for_day(&table, day))
            .collect();
        Self { table, windows }
    }

    /// Sun arc progress, `Visibility::HIDDEN` outside `[sunrise, sunset]`.
    pub fn resolve_sun_arc(&self, day: usize, hour: f64) -> Visibility {
        match self.table.record(day) {
            Some(record) => sun_arc(record.sun.rise, record.sun.set, hour),
            None => Visibility::HIDDEN,
        }
    }

    /// Days whose moon window progress can only be approximated.
    pub fn degraded_days(&self) -> Vec<usize> {
        self.windows
            .iter()
            .enumerate()
            .filter(|(_, window)| window.is_degraded())
            .map(|(day, _)| day)
            .collect()
    }

    pub fn windows(&self) -> &[MoonWindow] {
        &self.windows
    }
}

impl VisibilitySource for VisibilityResolver {
    fn table(&self) -> &AstroTable {
        &self.table
    }

    fn resolve_sun(&self, day: usize, hour: f64) -> bool {
        resolve_sun_visibility(&self.table, day, hour)
    }

    fn resolve_moon(&self, day: usize, hour: f64) -> Visibility {
        let Some(today) = self.windows.get(day) else {
            return Visibility::HIDDEN;
        };
        let previous = day.checked_sub(1).and_then(|prev| self.windows.get(prev));
        moon_visibility(previous, today, hour)
    }

    fn moon_window(&self, day: usize) -> MoonWindow {
        self.windows.get(day).copied().unwrap_or(MoonWindow::NoMoon)
    }
}

/// Whether the sun is up: `sunrise <= hour <= sunset`, false when either is absent.
pub fn resolve_sun_visibility(table: &AstroTable, day: usize, hour: f64) -> bool {
    table
        .record(day)
        .is_some_and(|record| match (record.sun.rise, record.sun.set) {
            (Some(rise), Some(set)) => rise <= hour && hour <= set,
            _ => false,
        })
}

/// Moon visibility computed directly from the table without a resolver.
///
/// Classifies the queried day and its predecessor on demand; results match
/// [`VisibilityResolver::resolve_moon`].
pub fn resolve_moon_visibility(table: &AstroTable, day: usize, hour: f64) -> Visibility {
    if table.record(day).is_none() {
        return Visibility::HIDDEN;
    }
    let today = MoonWindow::for_day(table, day);
    let previous = day.checked_sub(1).map(|prev| MoonWindow::for_day(table, prev));
    moon_visibility(previous.as_ref(), &today, hour)
}

fn sun_arc(rise: Option<f64>, set: Option<f64>, hour: f64) -> Visibility {
    match (rise, set) {
        (Some(rise), Some(set)) if rise <= hour && hour <= set => {
            let span = set - rise;
            Visibility::at(if span > 0.0 { (hour - rise) / span } else { 0.0 })
        }
        _ => Visibility::HIDDEN,
    }
}

/// Resolve `hour` on a day with window `today`, whose predecessor had `previous`.
fn moon_visibility(previous: Option<&MoonWindow>, today: &MoonWindow, hour: f64) -> Visibility {
    match *today {
        MoonWindow::SameDay { rise, set } if rise <= hour && hour <= set => {
            return Visibility::at((hour - rise) / (set - rise));
        }
        MoonWindow::RisesToday { rise, continues_to } if hour >= rise => {
            let set = continues_to.unwrap_or(FALLBACK_MOONSET_HOUR);
            return Visibility::at((hour - rise) / cross_day_span(rise, set));
        }
        MoonWindow::ContinuesFromYesterday { set, started_at } => {
            if hour > set {
                return Visibility::HIDDEN;
            }
            let progress = match started_at {
                Some(rise) => ((HOURS_PER_DAY - rise) + hour) / cross_day_span(rise, set),
                // Degraded: no partner rise, scale by today's portion only
                None if set > 0.0 => hour / set,
                None => 0.0,
            };
            return Visibility::at(progress);
        }
        _ => {}
    }

    // Second half of a window that rose yesterday
    match previous {
        Some(&MoonWindow::RisesToday {
            rise,
            continues_to: Some(set),
        }) if hour <= set => {
            Visibility::at(((HOURS_PER_DAY - rise) + hour) / cross_day_span(rise, set))
        }
        _ => Visibility::HIDDEN,
    }
}

/// Hours from `rise` on one day to `set` on the next.
fn cross_day_span(rise: f64, set: f64) -> f64 {
    (HOURS_PER_DAY - rise) + set
}
