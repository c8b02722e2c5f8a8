//! Sunrise/sunset synthesis from coordinates.
//!
//! Used when no sun table is available for the location (`sun_source =
//! "computed"`). Event times come from the `sunrise` crate in UTC and are shifted
//! into the table's local time with a fixed UTC offset.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use super::RiseSet;
use crate::common::utils::time_to_hours;

/// Compute sunrise and sunset hours (local time) for each date.
pub fn compute_sun_events(
    latitude: f64,
    longitude: f64,
    utc_offset_hours: f64,
    dates: &[NaiveDate],
) -> Result<Vec<RiseSet>> {
    let coord = Coordinates::new(latitude, longitude)
        .ok_or_else(|| anyhow::anyhow!("Invalid coordinates: {latitude}, {longitude}"))?;
    let offset = Duration::seconds((utc_offset_hours * 3600.0).round() as i64);

    let events = dates
        .iter()
        .map(|date| {
            let solar_day = SolarDay::new(coord, *date);
            let sunrise_local = solar_day.event_time(SolarEvent::Sunrise) + offset;
            let sunset_local = solar_day.event_time(SolarEvent::Sunset) + offset;

            RiseSet {
                rise: Some(time_to_hours(sunrise_local.time())),
                set: Some(time_to_hours(sunset_local.time())),
            }
        })
        .collect();

    Ok(events)
}
