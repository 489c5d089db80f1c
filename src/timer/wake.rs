//! One-shot background wake port.
//!
//! The host delivers a single background event at a requested local time. Arming
//! replaces any earlier request and cancelling twice is harmless.

use chrono::NaiveDateTime;

/// Host scheduler for the timer's background wake.
#[cfg_attr(test, mockall::automock)]
pub trait WakeScheduler {
    /// Request a wake at the given local time, replacing any armed wake.
    fn arm_wake(&mut self, at: NaiveDateTime);

    /// Drop the armed wake, if any.
    fn cancel_wake(&mut self);
}

/// In-memory scheduler holding at most one armed wake.
#[derive(Debug, Default, Clone)]
pub struct PendingWake {
    armed: Option<NaiveDateTime>,
}

impl PendingWake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<NaiveDateTime> {
        self.armed
    }

    /// Whether the armed wake should have fired by `now`.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.armed.is_some_and(|at| at <= now)
    }
}

impl WakeScheduler for PendingWake {
    fn arm_wake(&mut self, at: NaiveDateTime) {
        self.armed = Some(at);
    }

    fn cancel_wake(&mut self) {
        self.armed = None;
    }
}
