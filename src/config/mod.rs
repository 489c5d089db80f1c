//! Configuration for the sunfocus host tools.
//!
//! Settings come from an optional `sunfocus.toml` in the platform configuration
//! directory (or the directory given with `--config`). Every field is optional and
//! falls back to the defaults in [`crate::common::constants`]:
//!
//! ```toml
//! #[Clock]
//! timezone = "Europe/Kyiv"     # IANA name, takes precedence over the fixed offset
//! timezone_offset_minutes = 120 # Fixed offset east of UTC when no name is given
//!
//! #[Interval timer]
//! focus_minutes = 25           # Focus interval (1-1440)
//! break_minutes = 5            # Short break (1-1440)
//! long_break_minutes = 20      # Long break after a full set (1-1440)
//! rounds = 4                   # Focus rounds per set (>= 1)
//! autorun = false              # Start the next interval automatically
//!
//! #[Boot location]
//! latitude = 49.84             # Seeds the stored location when it was never set
//! longitude = 24.01
//! ```
//!
//! Without a timezone name or offset, the system's local offset is used.

pub mod loading;
pub mod validation;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;

use crate::common::constants::*;
use crate::geo::location::Location;
use crate::timer::phase::TimerSettings;

// Re-export public API
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub timezone: Option<String>,
    pub timezone_offset_minutes: Option<i32>,
    pub focus_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub rounds: Option<u32>,
    pub autorun: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load()
    }

    /// Validated timer durations and round count.
    pub fn timer_settings(&self) -> Result<TimerSettings> {
        TimerSettings::new(
            self.focus_minutes.unwrap_or(DEFAULT_FOCUS_MINUTES),
            self.break_minutes.unwrap_or(DEFAULT_BREAK_MINUTES),
            self.long_break_minutes.unwrap_or(DEFAULT_LONG_BREAK_MINUTES),
            self.rounds.unwrap_or(DEFAULT_ROUNDS),
        )
    }

    pub fn autorun(&self) -> bool {
        self.autorun.unwrap_or(DEFAULT_AUTORUN)
    }

    /// Boot-time location, when both coordinates are configured.
    pub fn default_location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Location::from_degrees(latitude, longitude),
            _ => None,
        }
    }

    /// Timezone offset in minutes east of UTC at the given UTC instant.
    ///
    /// A named timezone follows its daylight-saving rules; a fixed offset is used
    /// as is; otherwise the system local zone decides.
    pub fn offset_minutes_at(&self, utc: NaiveDateTime) -> Result<i32> {
        if let Some(name) = &self.timezone {
            let tz: Tz = name
                .parse()
                .map_err(|e| anyhow!("Unknown timezone '{name}': {e}"))?;
            return Ok(tz.offset_from_utc_datetime(&utc).fix().local_minus_utc() / 60);
        }

        if let Some(offset) = self.timezone_offset_minutes {
            return Ok(offset);
        }

        Ok(Local.offset_from_utc_datetime(&utc).local_minus_utc() / 60)
    }

    /// Print the effective configuration.
    pub fn log_config(&self, path: Option<&Path>) {
        match path {
            Some(path) => log_block_start!("Loaded configuration from {}", path.display()),
            None => log_block_start!("Using default configuration"),
        }

        match (&self.timezone, self.timezone_offset_minutes) {
            (Some(name), _) => log_indented!("Timezone: {name}"),
            (None, Some(offset)) => log_indented!("Timezone offset: {offset:+} minutes"),
            (None, None) => log_indented!("Timezone: system local"),
        }

        log_indented!(
            "Focus: {} min, break: {} min, long break: {} min",
            self.focus_minutes.unwrap_or(DEFAULT_FOCUS_MINUTES),
            self.break_minutes.unwrap_or(DEFAULT_BREAK_MINUTES),
            self.long_break_minutes.unwrap_or(DEFAULT_LONG_BREAK_MINUTES)
        );
        log_indented!(
            "Rounds per set: {}, autorun: {}",
            self.rounds.unwrap_or(DEFAULT_ROUNDS),
            self.autorun()
        );

        if let Some(location) = self.default_location() {
            log_indented!("Boot location: {location}");
        }
    }
}
