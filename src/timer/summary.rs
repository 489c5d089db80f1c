//! Render-ready view of the interval timer.

use serde::Serialize;

use super::phase::{TimerPhase, TimerSettings};
use super::scheduler::{TimerState, TimerStatus};
use crate::time::convert;

/// What the timer face shows: phase, round counters, and the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSummary {
    pub phase: TimerPhase,
    pub status: TimerStatus,
    pub count: u32,
    pub round_in_set: u32,
    pub minutes_remaining: u32,
    pub seconds_remaining: u32,
    pub is_started: bool,
    pub is_paused: bool,
    pub is_autorun: bool,
    /// Paused intervals alternate their phase label with a pause label every second.
    pub show_paused_label: bool,
}

impl TimerSummary {
    pub fn of(state: &TimerState, settings: &TimerSettings) -> Self {
        let (minutes_remaining, seconds_remaining) = match state.status() {
            TimerStatus::Idle => (settings.duration_minutes(state.phase), 0),
            TimerStatus::Running => convert::split_minutes_seconds(state.target_ts - state.now_ts),
            TimerStatus::Paused => convert::split_minutes_seconds(state.remainder_seconds),
        };

        Self {
            phase: state.phase,
            status: state.status(),
            count: state.count,
            round_in_set: settings.round_in_set(state.count),
            minutes_remaining,
            seconds_remaining,
            is_started: state.is_started,
            is_paused: state.is_paused,
            is_autorun: state.is_autorun,
            show_paused_label: state.is_paused && state.now_ts.rem_euclid(2) == 1,
        }
    }
}
