//! Configuration validation functionality.
//!
//! Rejects configurations the core cannot run with before any timer or resolver
//! is constructed.

use anyhow::{Context, Result};
use chrono_tz::Tz;

use super::Config;
use crate::common::constants::*;

/// Validate every configured field.
pub fn validate_config(config: &Config) -> Result<()> {
    for (name, value) in [
        ("focus_minutes", config.focus_minutes),
        ("break_minutes", config.break_minutes),
        ("long_break_minutes", config.long_break_minutes),
    ] {
        if let Some(minutes) = value
            && !(1..=MAXIMUM_INTERVAL_MINUTES).contains(&minutes)
        {
            anyhow::bail!(
                "{} ({} minutes) must be between 1 and {} minutes",
                name,
                minutes,
                MAXIMUM_INTERVAL_MINUTES
            );
        }
    }

    if config.rounds == Some(0) {
        anyhow::bail!("rounds must be at least 1 (a set needs one focus round)");
    }

    if let Some(offset) = config.timezone_offset_minutes
        && offset.abs() > MAXIMUM_OFFSET_MINUTES
    {
        anyhow::bail!(
            "timezone_offset_minutes ({}) must be between -{} and {}",
            offset,
            MAXIMUM_OFFSET_MINUTES,
            MAXIMUM_OFFSET_MINUTES
        );
    }

    if let Some(name) = &config.timezone
        && name.parse::<Tz>().is_err()
    {
        anyhow::bail!("timezone '{}' is not a known IANA timezone name", name);
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be configured together");
    }

    config
        .timer_settings()
        .context("Invalid interval timer settings")?;

    Ok(())
}
