//! Day-level solar event calculation.
//!
//! The resolver treats the astronomical rise/set calculation as a black box behind
//! [`SolarAlgorithm`]: given a calendar day and a position it returns the rise and
//! set as fractional UTC hours relative to midnight UTC of that day, or a status
//! saying the sun never crosses the horizon. [`SunriseSolver`] implements it on top
//! of the `sunrise` crate.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::common::constants::{
    AXIAL_TILT_DEGREES, MAXIMUM_SOLAR_EVENT_HOURS, SECONDS_PER_HOUR, SUN_HORIZON_ALTITUDE_DEGREES,
};

/// A horizon crossing of the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEventKind {
    Rise,
    Set,
}

impl SolarEventKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rise => "Sunrise",
            Self::Set => "Sunset",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Rise => "󰖜 ",
            Self::Set => "󰖛 ",
        }
    }
}

/// Outcome of a day-level solar calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarStatus {
    /// The sun rises and sets on this day.
    Ok,
    /// The sun stays above the horizon all day, there is no set.
    PermanentDay,
    /// The sun stays below the horizon all day, there is no rise.
    PermanentNight,
}

impl SolarStatus {
    /// The event that does not happen on a degenerate day.
    pub fn missing_event(&self) -> Option<SolarEventKind> {
        match self {
            Self::Ok => None,
            Self::PermanentDay => Some(SolarEventKind::Set),
            Self::PermanentNight => Some(SolarEventKind::Rise),
        }
    }
}

/// Rise and set for one day, in fractional UTC hours from midnight UTC.
///
/// The hours may be negative or exceed 24 and are only meaningful when `status`
/// is [`SolarStatus::Ok`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDayResult {
    pub status: SolarStatus,
    pub rise_utc_hours: f64,
    pub set_utc_hours: f64,
}

impl SolarDayResult {
    pub fn events(rise_utc_hours: f64, set_utc_hours: f64) -> Self {
        Self {
            status: SolarStatus::Ok,
            rise_utc_hours,
            set_utc_hours,
        }
    }

    pub fn degenerate(status: SolarStatus) -> Self {
        Self {
            status,
            rise_utc_hours: 0.0,
            set_utc_hours: 0.0,
        }
    }
}

/// Black-box rise/set calculation for a calendar day and position.
pub trait SolarAlgorithm {
    fn solve(&self, date: NaiveDate, longitude_deg: f64, latitude_deg: f64) -> SolarDayResult;
}

impl<F> SolarAlgorithm for F
where
    F: Fn(NaiveDate, f64, f64) -> SolarDayResult,
{
    fn solve(&self, date: NaiveDate, longitude_deg: f64, latitude_deg: f64) -> SolarDayResult {
        self(date, longitude_deg, latitude_deg)
    }
}

/// Rise/set calculation backed by the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseSolver;

impl SolarAlgorithm for SunriseSolver {
    fn solve(&self, date: NaiveDate, longitude_deg: f64, latitude_deg: f64) -> SolarDayResult {
        use sunrise::{Coordinates, SolarDay, SolarEvent};

        let status = polar_status(date, latitude_deg);
        if status != SolarStatus::Ok {
            return SolarDayResult::degenerate(status);
        }

        let Some(coord) = Coordinates::new(latitude_deg, longitude_deg) else {
            log_warning!("Invalid coordinates {latitude_deg:.2}, {longitude_deg:.2}");
            return SolarDayResult::degenerate(SolarStatus::PermanentNight);
        };

        let solar_day = SolarDay::new(coord, date);
        let midnight = date.and_time(NaiveTime::MIN);
        let hours_from_midnight = |event: SolarEvent| {
            let at = solar_day.event_time(event).naive_utc();
            at.signed_duration_since(midnight).num_seconds() as f64 / SECONDS_PER_HOUR as f64
        };

        checked_events(
            date,
            latitude_deg,
            hours_from_midnight(SolarEvent::Sunrise),
            hours_from_midnight(SolarEvent::Sunset),
        )
    }
}

/// Accept rise/set hours only when both are plausible for `date`.
///
/// Close to the polar circles the `sunrise` crate can miss a day without sunset or
/// sunrise that `polar_status` let through; its hour angle is then NaN and the event
/// comes back as the Unix epoch. Such days are classified by the declination.
fn checked_events(date: NaiveDate, latitude_deg: f64, rise: f64, set: f64) -> SolarDayResult {
    let plausible = |hours: f64| hours.is_finite() && hours.abs() <= MAXIMUM_SOLAR_EVENT_HOURS;
    if plausible(rise) && plausible(set) {
        return SolarDayResult::events(rise, set);
    }

    let status = if latitude_deg.signum() == solar_declination(date).signum() {
        SolarStatus::PermanentDay
    } else {
        SolarStatus::PermanentNight
    };
    log_debug!("Solar calculation for {date} gave rise {rise:.2}h, set {set:.2}h, using {status:?}");
    SolarDayResult::degenerate(status)
}

/// Approximate solar declination in radians.
fn solar_declination(date: NaiveDate) -> f64 {
    let day_of_year = f64::from(date.ordinal());
    AXIAL_TILT_DEGREES.to_radians() * (std::f64::consts::TAU * (284.0 + day_of_year) / 365.0).sin()
}

/// Classify days on which the sun never crosses the horizon.
///
/// Uses the cosine of the sunrise hour angle with an approximate declination;
/// values beyond ±1 mean the horizon is never reached.
pub fn polar_status(date: NaiveDate, latitude_deg: f64) -> SolarStatus {
    let declination = solar_declination(date);
    let latitude = latitude_deg.to_radians();

    let denominator = latitude.cos() * declination.cos();
    if denominator.abs() < f64::EPSILON {
        // At the poles the sign of the declination decides
        return if latitude.signum() == declination.signum() {
            SolarStatus::PermanentDay
        } else {
            SolarStatus::PermanentNight
        };
    }

    let cos_hour_angle = (SUN_HORIZON_ALTITUDE_DEGREES.to_radians().sin()
        - latitude.sin() * declination.sin())
        / denominator;

    if cos_hour_angle < -1.0 {
        SolarStatus::PermanentDay
    } else if cos_hour_angle > 1.0 {
        SolarStatus::PermanentNight
    } else {
        SolarStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_event_for_degenerate_days() {
        assert_eq!(SolarStatus::Ok.missing_event(), None);
        assert_eq!(
            SolarStatus::PermanentDay.missing_event(),
            Some(SolarEventKind::Set)
        );
        assert_eq!(
            SolarStatus::PermanentNight.missing_event(),
            Some(SolarEventKind::Rise)
        );
    }

    #[test]
    fn test_polar_status_arctic_summer_and_winter() {
        // Longyearbyen, 78.2°N
        assert_eq!(polar_status(date(2024, 6, 21), 78.2), SolarStatus::PermanentDay);
        assert_eq!(polar_status(date(2024, 12, 21), 78.2), SolarStatus::PermanentNight);
        // Southern hemisphere is reversed
        assert_eq!(polar_status(date(2024, 6, 21), -78.2), SolarStatus::PermanentNight);
    }

    #[test]
    fn test_polar_status_mid_latitudes() {
        assert_eq!(polar_status(date(2024, 6, 21), 40.73), SolarStatus::Ok);
        assert_eq!(polar_status(date(2024, 12, 21), -36.85), SolarStatus::Ok);
        assert_eq!(polar_status(date(2024, 3, 20), 0.0), SolarStatus::Ok);
    }

    #[test]
    fn test_sunrise_solver_mid_latitude() {
        // New York on the June solstice: rise ~09:25 UTC, set ~00:31 UTC next day
        let result = SunriseSolver.solve(date(2024, 6, 21), -73.93, 40.73);
        assert_eq!(result.status, SolarStatus::Ok);
        assert!(result.rise_utc_hours > 8.5 && result.rise_utc_hours < 10.0);
        assert!(result.set_utc_hours > 24.0 && result.set_utc_hours < 25.5);
        assert!(result.set_utc_hours > result.rise_utc_hours);
    }

    #[test]
    fn test_sunrise_solver_reports_polar_night() {
        let result = SunriseSolver.solve(date(2024, 12, 21), 15.6, 78.2);
        assert_eq!(result.status, SolarStatus::PermanentNight);
    }

    #[test]
    fn test_closure_as_algorithm() {
        let fixed = |_: NaiveDate, _: f64, _: f64| SolarDayResult::events(6.5, 18.25);
        let result = fixed.solve(date(2024, 1, 1), 0.0, 0.0);
        assert_eq!(result.rise_utc_hours, 6.5);
    }

    #[test]
    fn test_epoch_fallback_hours_become_degenerate() {
        // NaN hour angle from the crate surfaces as 1970-01-01, ~-477528h from the day
        assert_eq!(
            checked_events(date(2024, 6, 23), 65.75, -477_528.0, -477_528.0).status,
            SolarStatus::PermanentDay
        );
        assert_eq!(
            checked_events(date(2024, 12, 21), 66.4, 9.5, f64::NAN).status,
            SolarStatus::PermanentNight
        );
        assert_eq!(
            checked_events(date(2024, 6, 23), -66.0, 60.0, 10.0).status,
            SolarStatus::PermanentNight
        );

        let result = checked_events(date(2024, 6, 23), 65.75, -1.5, 25.0);
        assert_eq!(result.status, SolarStatus::Ok);
        assert_eq!(result.set_utc_hours, 25.0);
    }

    #[test]
    fn test_sunrise_solver_near_arctic_circle_never_reports_bogus_hours() {
        for day in 1..=30 {
            for step in 0..=40 {
                let latitude = 65.0 + f64::from(step) * 0.05;
                let result = SunriseSolver.solve(date(2024, 6, day), 0.0, latitude);
                if result.status == SolarStatus::Ok {
                    assert!(
                        result.rise_utc_hours.abs() <= MAXIMUM_SOLAR_EVENT_HOURS
                            && result.set_utc_hours.abs() <= MAXIMUM_SOLAR_EVENT_HOURS,
                        "lat {latitude} on June {day}: {result:?}"
                    );
                }
            }
        }
    }
}
