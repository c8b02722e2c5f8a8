//! Configuration validation functionality.

use anyhow::Result;

use super::{Config, parse_reference_new_moon};
use crate::common::constants::*;

/// Reject out-of-range coordinates, offsets and malformed values.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&lat)
    {
        anyhow::bail!(
            "latitude must be between {} and {} degrees (got {})",
            MINIMUM_LATITUDE,
            MAXIMUM_LATITUDE,
            lat
        );
    }

    if let Some(lon) = config.longitude
        && !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between {} and {} degrees (got {})",
            MINIMUM_LONGITUDE,
            MAXIMUM_LONGITUDE,
            lon
        );
    }

    if let Some(offset) = config.utc_offset
        && !(MINIMUM_UTC_OFFSET..=MAXIMUM_UTC_OFFSET).contains(&offset)
    {
        anyhow::bail!(
            "utc_offset must be between {} and {} hours (got {})",
            MINIMUM_UTC_OFFSET,
            MAXIMUM_UTC_OFFSET,
            offset
        );
    }

    if let Some(ref reference) = config.reference_new_moon {
        parse_reference_new_moon(reference)?;
    }

    validate_table_path(config.sun_table.as_deref(), "sun_table")?;
    validate_table_path(config.moon_table.as_deref(), "moon_table")?;

    Ok(())
}

fn validate_table_path(value: Option<&str>, field_name: &str) -> Result<()> {
    if let Some(path) = value
        && path.trim().is_empty()
    {
        anyhow::bail!("{} must not be empty", field_name);
    }
    Ok(())
}
