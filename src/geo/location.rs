//! Stored geographic location and its persistence port.
//!
//! The location lives in a single 32-bit backup register: latitude in the low half,
//! longitude in the high half, each a two's-complement centidegree value. A register
//! of zero means no location has been configured.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use super::coordinate::Axis;

/// Latitude and longitude in hundredths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    latitude_centidegrees: i16,
    longitude_centidegrees: i16,
}

impl Location {
    /// The "no location configured" sentinel.
    pub const UNSET: Location = Location {
        latitude_centidegrees: 0,
        longitude_centidegrees: 0,
    };

    /// Build a location, clamping each component into its axis range.
    pub fn new(latitude_centidegrees: i16, longitude_centidegrees: i16) -> Self {
        Self {
            latitude_centidegrees: Axis::Latitude.clamp(i32::from(latitude_centidegrees)),
            longitude_centidegrees: Axis::Longitude.clamp(i32::from(longitude_centidegrees)),
        }
    }

    /// Build a location from degrees, rounding to the nearest centidegree.
    ///
    /// Returns `None` when either component is outside its range or not finite.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Option<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self::new(
            (latitude * 100.0).round() as i16,
            (longitude * 100.0).round() as i16,
        ))
    }

    pub fn latitude_centidegrees(&self) -> i16 {
        self.latitude_centidegrees
    }

    pub fn longitude_centidegrees(&self) -> i16 {
        self.longitude_centidegrees
    }

    pub fn latitude_degrees(&self) -> f64 {
        f64::from(self.latitude_centidegrees) / 100.0
    }

    pub fn longitude_degrees(&self) -> f64 {
        f64::from(self.longitude_centidegrees) / 100.0
    }

    /// Whether this is a real location rather than the zero sentinel.
    pub fn is_configured(&self) -> bool {
        *self != Self::UNSET
    }

    /// Pack into the backup-register layout.
    pub fn pack(&self) -> i32 {
        let low = u32::from(self.latitude_centidegrees as u16);
        let high = u32::from(self.longitude_centidegrees as u16);
        ((high << 16) | low) as i32
    }

    /// Unpack from the backup-register layout.
    ///
    /// Halves outside the valid range (a corrupted or foreign register) are
    /// clamped into bounds with a warning.
    pub fn unpack(register: i32) -> Self {
        let bits = register as u32;
        let latitude = (bits & 0xFFFF) as u16 as i16;
        let longitude = (bits >> 16) as u16 as i16;
        let location = Self::new(latitude, longitude);

        if location.latitude_centidegrees != latitude
            || location.longitude_centidegrees != longitude
        {
            log_warning!(
                "Stored location {latitude}/{longitude} is out of range, clamped to {location}"
            );
        }

        location
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}°, {:.2}°",
            self.latitude_degrees(),
            self.longitude_degrees()
        )
    }
}

/// Persistent storage for the packed location register.
pub trait LocationStore {
    /// Read the packed register, `0` when never written.
    fn load_location(&self) -> Result<i32>;

    /// Write the packed register.
    fn save_location(&mut self, packed: i32) -> Result<()>;

    /// Read and unpack the stored location.
    fn location(&self) -> Result<Location> {
        self.load_location().map(Location::unpack)
    }
}

/// In-memory backup register, the store used on the device and in tests.
#[derive(Debug, Default)]
pub struct BackupRegister {
    value: i32,
    writes: usize,
}

impl BackupRegister {
    pub fn new(value: i32) -> Self {
        Self { value, writes: 0 }
    }

    /// Number of writes since construction.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LocationStore for BackupRegister {
    fn load_location(&self) -> Result<i32> {
        Ok(self.value)
    }

    fn save_location(&mut self, packed: i32) -> Result<()> {
        self.value = packed;
        self.writes += 1;
        Ok(())
    }
}
