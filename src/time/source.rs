//! Clock abstraction for real and simulated time.
//!
//! The core never reads the host clock directly. Handlers receive a [`Clock`] so the
//! same code runs against the system clock in the CLI and against a
//! [`SimulatedClock`] in simulations and tests.

use std::cell::Cell;

use chrono::{NaiveDateTime, Utc};

use super::convert::{self, Timestamp};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current local date and time.
    fn now_local(&self) -> NaiveDateTime;

    /// Current epoch timestamp, reading the local clock with the given offset.
    fn now_epoch(&self, offset_minutes: i32) -> Timestamp {
        convert::datetime_to_epoch(self.now_local(), offset_minutes)
    }
}

/// Host system clock viewed through a fixed timezone offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset_minutes: i32,
}

impl SystemClock {
    pub fn new(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }
}

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        convert::from_utc(Utc::now().naive_utc(), self.offset_minutes)
    }
}

/// Manually driven clock for simulations and tests.
///
/// Time only moves when [`advance`](SimulatedClock::advance) or
/// [`set`](SimulatedClock::set) is called, which makes runs reproducible. All
/// access happens from the single event-handling thread, so interior mutability
/// is a plain `Cell`.
#[derive(Debug)]
pub struct SimulatedClock {
    now: Cell<NaiveDateTime>,
}

impl SimulatedClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute local time.
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock forward (or backward, for negative values) by seconds.
    pub fn advance(&self, seconds: i64) {
        self.now
            .set(self.now.get() + chrono::Duration::seconds(seconds));
    }
}

impl Clock for SimulatedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS".
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
}
