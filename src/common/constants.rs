//! Application-wide constants and defaults.

// # Interval timer defaults

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 20;
pub const DEFAULT_ROUNDS: u32 = 4;
pub const DEFAULT_AUTORUN: bool = false;

/// Upper bound for any single interval, one day.
pub const MAXIMUM_INTERVAL_MINUTES: u32 = 24 * 60;

// # Time

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Timezone offsets must stay strictly within one day.
pub const MAXIMUM_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Seconds in a minute below which a fractional minute rounds down.
pub const MINUTE_ROUNDING_THRESHOLD_SECONDS: f64 = 30.0;

// # Geographic bounds (centidegrees)

pub const MAXIMUM_LATITUDE_CENTI: i32 = 9000;
pub const MAXIMUM_LONGITUDE_CENTI: i32 = 18000;

/// Number of decimal digits in an editable coordinate (hundreds..hundredths).
pub const COORDINATE_DIGITS: usize = 5;

/// Cursor positions on an edit page: sign, then the five digits.
pub const EDIT_CURSOR_POSITIONS: u8 = 6;

// # Solar search

/// Days examined when looking for the next rise or set (today, then tomorrow).
pub const SOLAR_SEARCH_DAYS: usize = 2;

/// Rise/set hours further than this from the requested day's midnight are not real events.
pub const MAXIMUM_SOLAR_EVENT_HOURS: f64 = 48.0;

/// Altitude of the sun's upper limb at rise/set including refraction, in degrees.
pub const SUN_HORIZON_ALTITUDE_DEGREES: f64 = -0.833;

/// Maximum solar declination (axial tilt), in degrees.
pub const AXIAL_TILT_DEGREES: f64 = 23.44;

// # Files

pub const CONFIG_DIR_NAME: &str = "sunfocus";
pub const CONFIG_FILE_NAME: &str = "sunfocus.toml";
pub const STATE_FILE_NAME: &str = "backup.json";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
