//! Focus/break interval state machine.
//!
//! The timer is `Idle`, `Running` or `Paused` in one of three phases. Starting a
//! focus interval counts a round; the background wake that ends an interval moves
//! to the next phase and, with autorun on, starts it immediately. Every
//! transition runs to completion inside one host event, and any transition that
//! abandons an interval cancels the armed wake before returning.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::phase::{TimerPhase, TimerSettings};
use super::summary::TimerSummary;
use super::wake::WakeScheduler;
use crate::time::convert::{self, Timestamp};
use crate::time::source::Clock;

/// Coarse state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Mutable timer state owned by one face instance.
///
/// `is_paused` implies `is_started`. `remainder_seconds` is meaningful only while
/// paused, and `target_ts >= now_ts` while running until the wake is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub is_started: bool,
    pub is_paused: bool,
    pub is_autorun: bool,
    pub count: u32,
    pub now_ts: Timestamp,
    pub target_ts: Timestamp,
    pub remainder_seconds: i64,
}

impl TimerState {
    pub fn status(&self) -> TimerStatus {
        match (self.is_started, self.is_paused) {
            (false, _) => TimerStatus::Idle,
            (true, false) => TimerStatus::Running,
            (true, true) => TimerStatus::Paused,
        }
    }
}

/// Result of a timer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TimerOutcome {
    Started {
        phase: TimerPhase,
        wake_at: NaiveDateTime,
    },
    Paused {
        remainder_seconds: i64,
    },
    Resumed {
        wake_at: NaiveDateTime,
    },
    /// An interval ended. `restarted` is set when autorun started the next one.
    Rang {
        from: TimerPhase,
        to: TimerPhase,
        restarted: bool,
    },
    Reset {
        phase: TimerPhase,
    },
    AutorunToggled {
        enabled: bool,
    },
    PhaseSelected {
        phase: TimerPhase,
    },
    RoundsCleared,
    /// The request does not apply to the current state, e.g. a stale wake.
    Ignored,
}

/// Interval timer driving a background wake through a [`WakeScheduler`].
#[derive(Debug)]
pub struct IntervalTimer<W: WakeScheduler> {
    settings: TimerSettings,
    state: TimerState,
    wake: W,
    offset_minutes: i32,
}

impl<W: WakeScheduler> IntervalTimer<W> {
    /// Idle timer in the focus phase with no rounds counted.
    pub fn new(settings: TimerSettings, wake: W, offset_minutes: i32) -> Self {
        Self {
            settings,
            state: TimerState::default(),
            wake,
            offset_minutes,
        }
    }

    /// Set the initial autorun flag.
    pub fn with_autorun(mut self, autorun: bool) -> Self {
        self.state.is_autorun = autorun;
        self
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status()
    }

    pub fn wake(&self) -> &W {
        &self.wake
    }

    fn arm(&mut self) -> NaiveDateTime {
        let wake_at = convert::epoch_to_datetime(self.state.target_ts, self.offset_minutes);
        self.wake.arm_wake(wake_at);
        wake_at
    }

    /// Start the current phase. Starting a focus interval counts a round.
    pub fn start(&mut self, clock: &impl Clock) -> TimerOutcome {
        if self.status() != TimerStatus::Idle {
            return TimerOutcome::Ignored;
        }

        let phase = self.state.phase;
        if phase == TimerPhase::Focus {
            self.state.count += 1;
        }

        let minutes = i64::from(self.settings.duration_minutes(phase));
        self.state.is_started = true;
        self.state.now_ts = clock.now_epoch(self.offset_minutes);
        self.state.target_ts = convert::offset_timestamp(self.state.now_ts, minutes, 0);
        let wake_at = self.arm();

        log_debug!(
            "{} started (round {}), wake at {wake_at}",
            phase.display_name(),
            self.state.count
        );
        TimerOutcome::Started { phase, wake_at }
    }

    /// Freeze the countdown and cancel the wake.
    pub fn pause(&mut self) -> TimerOutcome {
        if self.status() != TimerStatus::Running {
            return TimerOutcome::Ignored;
        }

        let remainder_seconds = (self.state.target_ts - self.state.now_ts).max(0);
        self.state.is_paused = true;
        self.state.remainder_seconds = remainder_seconds;
        self.wake.cancel_wake();

        log_debug!("Paused with {remainder_seconds}s remaining");
        TimerOutcome::Paused { remainder_seconds }
    }

    /// Continue a paused interval with exactly the remaining time it had.
    pub fn resume(&mut self, clock: &impl Clock) -> TimerOutcome {
        if self.status() != TimerStatus::Paused {
            return TimerOutcome::Ignored;
        }

        let (minutes, seconds) = convert::split_minutes_seconds(self.state.remainder_seconds);
        self.state.is_paused = false;
        self.state.now_ts = clock.now_epoch(self.offset_minutes);
        self.state.target_ts = convert::offset_timestamp(
            self.state.now_ts,
            i64::from(minutes),
            i64::from(seconds),
        );
        let wake_at = self.arm();

        log_debug!("Resumed, wake at {wake_at}");
        TimerOutcome::Resumed { wake_at }
    }

    /// Advance the running countdown by one second. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if self.status() != TimerStatus::Running {
            return false;
        }
        self.state.now_ts += 1;
        true
    }

    /// Handle the background wake that ends the running interval.
    ///
    /// A wake arriving in any other state is stale and ignored. With autorun on, the
    /// next phase is started and `restarted` is set; its wake time is then available
    /// from the scheduler or [`TimerSummary`].
    pub fn ring(&mut self, clock: &impl Clock) -> TimerOutcome {
        if self.status() != TimerStatus::Running {
            log_debug!("Ignoring stale wake while {:?}", self.status());
            return TimerOutcome::Ignored;
        }

        let from = self.state.phase;
        let to = match from {
            TimerPhase::Focus if self.settings.completes_set(self.state.count) => {
                TimerPhase::LongBreak
            }
            TimerPhase::Focus => TimerPhase::Break,
            TimerPhase::Break | TimerPhase::LongBreak => TimerPhase::Focus,
        };

        self.state.phase = to;
        self.reset_state();
        log_debug!("{} finished, next: {}", from.display_name(), to.display_name());

        // reset_state left the timer Idle, so an autorun start always succeeds
        let restarted = self.state.is_autorun
            && matches!(self.start(clock), TimerOutcome::Started { .. });

        TimerOutcome::Rang {
            from,
            to,
            restarted,
        }
    }

    /// Abandon a paused interval without advancing the phase.
    ///
    /// An abandoned focus interval does not count as a round.
    pub fn cancel_or_reset_current(&mut self) -> TimerOutcome {
        if self.status() != TimerStatus::Paused {
            return TimerOutcome::Ignored;
        }

        if self.state.phase == TimerPhase::Focus {
            self.state.count = self.state.count.saturating_sub(1);
        }
        self.reset_state();

        log_debug!("{} abandoned", self.state.phase.display_name());
        TimerOutcome::Reset {
            phase: self.state.phase,
        }
    }

    /// Flip autorun while an interval is in progress.
    pub fn toggle_autorun(&mut self) -> TimerOutcome {
        if self.status() == TimerStatus::Idle {
            return TimerOutcome::Ignored;
        }
        self.state.is_autorun = !self.state.is_autorun;
        TimerOutcome::AutorunToggled {
            enabled: self.state.is_autorun,
        }
    }

    /// Pick the starting phase manually while idle. Does not touch the round count.
    pub fn cycle_phase_when_idle(&mut self) -> TimerOutcome {
        if self.status() != TimerStatus::Idle {
            return TimerOutcome::Ignored;
        }
        self.state.phase = self.state.phase.next_in_cycle();
        TimerOutcome::PhaseSelected {
            phase: self.state.phase,
        }
    }

    /// Zero the round count while idle.
    pub fn clear_rounds(&mut self) -> TimerOutcome {
        if self.status() != TimerStatus::Idle {
            return TimerOutcome::Ignored;
        }
        self.state.count = 0;
        TimerOutcome::RoundsCleared
    }

    /// The face became visible again: ticks were not delivered while hidden, so
    /// re-read the clock.
    pub fn activate(&mut self, clock: &impl Clock) {
        if self.state.is_started {
            self.state.now_ts = clock.now_epoch(self.offset_minutes);
        }
    }

    fn reset_state(&mut self) {
        self.state.is_started = false;
        self.state.is_paused = false;
        self.wake.cancel_wake();
    }

    /// Render-ready view of the current state.
    pub fn summary(&self) -> TimerSummary {
        TimerSummary::of(&self.state, &self.settings)
    }
}
