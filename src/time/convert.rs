//! Conversions between epoch timestamps, zone-shifted wall clocks, and fractional hours.
//!
//! Every function here is pure. Timezone offsets are whole minutes east of UTC, the
//! same unit the host's timezone table uses. Wall-clock values are `NaiveDateTime`s
//! whose meaning (local or UTC) is fixed by the function that produced them.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::common::constants::{
    MINUTE_ROUNDING_THRESHOLD_SECONDS, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Signed seconds since 1970-01-01T00:00:00Z.
pub type Timestamp = i64;

fn offset_duration(offset_minutes: i32) -> Duration {
    Duration::minutes(i64::from(offset_minutes))
}

/// Shift a local wall-clock value to the UTC wall clock.
pub fn to_utc(local: NaiveDateTime, offset_minutes: i32) -> NaiveDateTime {
    local - offset_duration(offset_minutes)
}

/// Shift a UTC wall-clock value to the local wall clock.
pub fn from_utc(utc: NaiveDateTime, offset_minutes: i32) -> NaiveDateTime {
    utc + offset_duration(offset_minutes)
}

/// Convert an epoch timestamp to the local calendar date and time.
///
/// Timestamps outside chrono's representable range saturate to its limits.
pub fn epoch_to_datetime(ts: Timestamp, offset_minutes: i32) -> NaiveDateTime {
    let local_seconds = ts.saturating_add(i64::from(offset_minutes) * SECONDS_PER_MINUTE);
    match DateTime::from_timestamp(local_seconds, 0) {
        Some(dt) => dt.naive_utc(),
        None if local_seconds < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

/// Convert a local calendar date and time to an epoch timestamp.
pub fn datetime_to_epoch(local: NaiveDateTime, offset_minutes: i32) -> Timestamp {
    local.and_utc().timestamp() - i64::from(offset_minutes) * SECONDS_PER_MINUTE
}

/// Advance a timestamp by whole days.
pub fn add_days(ts: Timestamp, days: i64) -> Timestamp {
    ts + days * SECONDS_PER_DAY
}

/// Advance a timestamp by minutes and seconds.
pub fn offset_timestamp(ts: Timestamp, minutes: i64, seconds: i64) -> Timestamp {
    ts + minutes * SECONDS_PER_MINUTE + seconds
}

/// Split fractional hours into a whole hour and a rounded minute.
///
/// The hour is the floor of `hours`, so negative or >24 inputs keep their sign and
/// magnitude for day rollover upstream. The minute rounds half up at 30 seconds. A
/// minute that rounds up to 60 carries into the hour, so the minute is always
/// within `0..60`.
pub fn fractional_hours_to_hm(hours: f64) -> (i64, u32) {
    let whole = hours.floor();
    let minutes = (hours - whole) * 60.0;
    let seconds = (minutes - minutes.floor()) * 60.0;

    let mut hour = whole as i64;
    let mut minute = if seconds < MINUTE_ROUNDING_THRESHOLD_SECONDS {
        minutes.floor() as u32
    } else {
        minutes.ceil() as u32
    };

    if minute >= 60 {
        hour = hour.saturating_add(1);
        minute -= 60;
    }

    (hour, minute)
}

/// Place a fractional local hour relative to midnight of `day`.
///
/// Hours below zero land on earlier days and hours of 24 or more land on later days,
/// so the result is a valid calendar date-time at whole-minute precision. Returns
/// `None` for non-finite hours or when the result is outside chrono's range.
pub fn local_event_datetime(day: NaiveDate, local_hours: f64) -> Option<NaiveDateTime> {
    if !local_hours.is_finite() {
        return None;
    }

    let (hour, minute) = fractional_hours_to_hm(local_hours);
    let seconds = hour
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(i64::from(minute) * SECONDS_PER_MINUTE)?;
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    midnight.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Whole minutes and remaining seconds of a non-negative span, negative spans read as zero.
pub fn split_minutes_seconds(seconds: i64) -> (u32, u32) {
    let seconds = seconds.max(0);
    let minutes = u32::try_from(seconds / SECONDS_PER_MINUTE).unwrap_or(u32::MAX);
    (minutes, (seconds % SECONDS_PER_MINUTE) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_zone_shift_crosses_midnight() {
        // 01:30 in UTC+3 is 22:30 of the previous day in UTC
        let local = at(2024, 3, 1, 1, 30, 0);
        assert_eq!(to_utc(local, 180), at(2024, 2, 29, 22, 30, 0));
        assert_eq!(from_utc(at(2024, 2, 29, 22, 30, 0), 180), local);

        // 23:00 UTC is 01:00 next day in UTC+2
        assert_eq!(from_utc(at(2023, 12, 31, 23, 0, 0), 120), at(2024, 1, 1, 1, 0, 0));
    }

    #[test]
    fn test_epoch_roundtrip_with_offsets() {
        let local = at(2024, 6, 21, 0, 15, 42);
        for offset in [-720, -300, 0, 330, 545, 840] {
            let ts = datetime_to_epoch(local, offset);
            assert_eq!(epoch_to_datetime(ts, offset), local, "offset {offset}");
        }
    }

    #[test]
    fn test_epoch_to_datetime_known_values() {
        assert_eq!(epoch_to_datetime(0, 0), at(1970, 1, 1, 0, 0, 0));
        assert_eq!(epoch_to_datetime(0, -60), at(1969, 12, 31, 23, 0, 0));
        assert_eq!(epoch_to_datetime(1_700_000_000, 0), at(2023, 11, 14, 22, 13, 20));
    }

    #[test]
    fn test_add_days_advances_calendar() {
        let ts = datetime_to_epoch(at(2024, 2, 28, 12, 0, 0), 0);
        assert_eq!(epoch_to_datetime(add_days(ts, 1), 0), at(2024, 2, 29, 12, 0, 0));
        assert_eq!(epoch_to_datetime(add_days(ts, 2), 0), at(2024, 3, 1, 12, 0, 0));
        assert_eq!(epoch_to_datetime(add_days(ts, -1), 0), at(2024, 2, 27, 12, 0, 0));
    }

    #[test]
    fn test_fractional_hours_basic() {
        assert_eq!(fractional_hours_to_hm(8.5), (8, 30));
        assert_eq!(fractional_hours_to_hm(20.25), (20, 15));
        assert_eq!(fractional_hours_to_hm(0.0), (0, 0));
    }

    #[test]
    fn test_fractional_hours_rounding_tie_break() {
        // 6.999h = 6h 59m 56.4s, rounds up and carries into the hour
        assert_eq!(fractional_hours_to_hm(6.999), (7, 0));
        // 6.99h = 6h 59m 24s, rounds down
        assert_eq!(fractional_hours_to_hm(6.99), (6, 59));
        // exactly 30 seconds rounds up: 10.125h = 10h 7m 30s
        assert_eq!(fractional_hours_to_hm(10.125), (10, 8));
        assert_eq!(fractional_hours_to_hm(23.9999), (24, 0));
    }

    #[test]
    fn test_fractional_hours_negative_and_overflowing() {
        // -0.5h is 23:30 of the previous day
        assert_eq!(fractional_hours_to_hm(-0.5), (-1, 30));
        assert_eq!(fractional_hours_to_hm(-2.0), (-2, 0));
        assert_eq!(fractional_hours_to_hm(25.75), (25, 45));
    }

    #[test]
    fn test_local_event_datetime_rolls_days() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            local_event_datetime(day, -0.5),
            Some(at(2023, 12, 31, 23, 30, 0))
        );
        assert_eq!(
            local_event_datetime(day, 25.75),
            Some(at(2024, 1, 2, 1, 45, 0))
        );
        let noon = local_event_datetime(day, 12.0).unwrap();
        assert_eq!((noon.hour(), noon.minute()), (12, 0));
    }

    #[test]
    fn test_local_event_datetime_out_of_range_is_none() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(local_event_datetime(day, 1.0e13), None);
        assert_eq!(local_event_datetime(day, -1.0e13), None);
        assert_eq!(local_event_datetime(day, 1.0e300), None);
        assert_eq!(local_event_datetime(day, f64::INFINITY), None);
        assert_eq!(local_event_datetime(day, f64::NEG_INFINITY), None);
        assert_eq!(local_event_datetime(day, f64::NAN), None);
    }

    #[test]
    fn test_split_minutes_seconds() {
        assert_eq!(split_minutes_seconds(1500), (25, 0));
        assert_eq!(split_minutes_seconds(61), (1, 1));
        assert_eq!(split_minutes_seconds(-5), (0, 0));
    }
}
