//! Next sunrise/sunset resolution for a stored location.
//!
//! Starting from the current UTC calendar day, the resolver asks the solar
//! algorithm for that day's rise and set, moves both into local wall-clock time,
//! and picks the first one at or after "now". When both already passed it looks
//! at the next day. The search is capped at [`SOLAR_SEARCH_DAYS`] days.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use super::location::Location;
use super::solar::{SolarAlgorithm, SolarEventKind, SolarStatus};
use crate::common::constants::SOLAR_SEARCH_DAYS;
use crate::time::convert;

/// Which of the upcoming events the viewer asked to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFocus {
    /// The soonest event at or after now.
    #[default]
    Upcoming,
    /// The event after the soonest one, e.g. tonight's sunset before sunrise.
    Following,
}

impl EventFocus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Upcoming => Self::Following,
            Self::Following => Self::Upcoming,
        }
    }
}

/// Render-ready result of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SolarReport {
    /// The stored location is the zero sentinel.
    NoLocation,
    /// The sun does not rise (or set) on `day`: polar night or day.
    NoEvent { kind: SolarEventKind, day: NaiveDate },
    /// The selected event, in local wall-clock time.
    NextEvent {
        kind: SolarEventKind,
        at: NaiveDateTime,
    },
}

impl SolarReport {
    /// Day of month, hour and minute of a resolved event.
    pub fn day_hour_minute(&self) -> Option<(u32, u32, u32)> {
        match self {
            Self::NextEvent { at, .. } => {
                Some((at.day(), at.hour(), at.minute()))
            }
            _ => None,
        }
    }
}

/// Resolves the next rise or set using a day-level solar algorithm.
pub struct SolarEventResolver<'a, A: SolarAlgorithm + ?Sized> {
    algorithm: &'a A,
}

impl<'a, A: SolarAlgorithm + ?Sized> SolarEventResolver<'a, A> {
    pub fn new(algorithm: &'a A) -> Self {
        Self { algorithm }
    }

    /// Find the event to show for `location` as seen at local time `now`.
    ///
    /// Rise is examined before set on each day. An event counts when it is at or
    /// after `now`; with [`EventFocus::Following`] the first counting event is
    /// skipped and the next event examined is taken as the answer. A day on which
    /// the sun never crosses the horizon is reported as [`SolarReport::NoEvent`]
    /// for that day without looking further.
    pub fn resolve(
        &self,
        now: NaiveDateTime,
        location: Location,
        offset_minutes: i32,
        focus: EventFocus,
    ) -> SolarReport {
        if !location.is_configured() {
            return SolarReport::NoLocation;
        }

        let latitude = location.latitude_degrees();
        let longitude = location.longitude_degrees();
        let hours_from_utc = f64::from(offset_minutes) / 60.0;

        let utc_now = convert::to_utc(now, offset_minutes);
        let utc_now_ts = convert::datetime_to_epoch(utc_now, 0);

        let mut show_next_match = false;
        let mut last_kind = SolarEventKind::Set;
        let mut day = utc_now.date();

        for day_index in 0..SOLAR_SEARCH_DAYS {
            day = convert::epoch_to_datetime(convert::add_days(utc_now_ts, day_index as i64), 0)
                .date();

            let result = self.algorithm.solve(day, longitude, latitude);
            if let Some(kind) = result.status.missing_event() {
                log_debug!(
                    "No {} on {day} at {location}",
                    kind.display_name().to_lowercase()
                );
                return SolarReport::NoEvent { kind, day };
            }
            debug_assert_eq!(result.status, SolarStatus::Ok);

            let candidates = [
                (SolarEventKind::Rise, result.rise_utc_hours),
                (SolarEventKind::Set, result.set_utc_hours),
            ];

            for (kind, utc_hours) in candidates {
                last_kind = kind;
                let Some(at) = convert::local_event_datetime(day, utc_hours + hours_from_utc)
                else {
                    log_debug!("Ignoring unrepresentable {} hour {utc_hours}", kind.display_name());
                    continue;
                };

                if show_next_match {
                    return SolarReport::NextEvent { kind, at };
                }
                if at >= now {
                    match focus {
                        EventFocus::Upcoming => return SolarReport::NextEvent { kind, at },
                        EventFocus::Following => show_next_match = true,
                    }
                }
            }

            log_debug!("Both solar events of {day} have passed, checking the next day");
        }

        SolarReport::NoEvent {
            kind: last_kind,
            day,
        }
    }
}
