//! Timer phases and the durations configured for them.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::common::constants::{
    DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, DEFAULT_LONG_BREAK_MINUTES, DEFAULT_ROUNDS,
    MAXIMUM_INTERVAL_MINUTES,
};

/// Kind of interval the timer is counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Focus,
    Break,
    LongBreak,
}

impl TimerPhase {
    /// Manual selection order while idle.
    pub fn next_in_cycle(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::LongBreak,
            Self::LongBreak => Self::Focus,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
            Self::LongBreak => "Long break",
        }
    }
}

/// Interval lengths and the number of focus rounds per set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSettings {
    focus_minutes: u32,
    break_minutes: u32,
    long_break_minutes: u32,
    rounds: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl TimerSettings {
    /// Validate and build timer settings.
    ///
    /// Every duration must be between 1 and 1440 minutes and `rounds` at least 1,
    /// since round counting is modulo `rounds`.
    pub fn new(
        focus_minutes: u32,
        break_minutes: u32,
        long_break_minutes: u32,
        rounds: u32,
    ) -> Result<Self> {
        for (name, minutes) in [
            ("focus_minutes", focus_minutes),
            ("break_minutes", break_minutes),
            ("long_break_minutes", long_break_minutes),
        ] {
            if !(1..=MAXIMUM_INTERVAL_MINUTES).contains(&minutes) {
                bail!("{name} ({minutes}) must be between 1 and {MAXIMUM_INTERVAL_MINUTES} minutes");
            }
        }
        if rounds == 0 {
            bail!("rounds must be at least 1");
        }

        Ok(Self {
            focus_minutes,
            break_minutes,
            long_break_minutes,
            rounds,
        })
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn duration_minutes(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Focus => self.focus_minutes,
            TimerPhase::Break => self.break_minutes,
            TimerPhase::LongBreak => self.long_break_minutes,
        }
    }

    /// Position of focus round `count` within its set, for display.
    ///
    /// `0` before any round started; a completed set shows as `rounds`, not `0`.
    pub fn round_in_set(&self, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        match count % self.rounds {
            0 => self.rounds,
            round => round,
        }
    }

    /// Whether finishing focus round `count` earns a long break.
    pub fn completes_set(&self, count: u32) -> bool {
        count != 0 && count % self.rounds == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_rounds_and_durations() {
        assert!(TimerSettings::new(25, 5, 20, 0).is_err());
        assert!(TimerSettings::new(0, 5, 20, 4).is_err());
        assert!(TimerSettings::new(25, 0, 20, 4).is_err());
        assert!(TimerSettings::new(25, 5, 0, 4).is_err());
        assert!(TimerSettings::new(25, 5, 1441, 4).is_err());
        assert!(TimerSettings::new(1, 1, 1, 1).is_ok());
    }

    #[test]
    fn test_round_in_set_display() {
        let settings = TimerSettings::new(25, 5, 20, 4).unwrap();
        let shown: Vec<u32> = (0..=9).map(|count| settings.round_in_set(count)).collect();
        assert_eq!(shown, vec![0, 1, 2, 3, 4, 1, 2, 3, 4, 1]);
    }

    #[test]
    fn test_completes_set() {
        let settings = TimerSettings::new(25, 5, 20, 4).unwrap();
        assert!(!settings.completes_set(0));
        assert!(!settings.completes_set(3));
        assert!(settings.completes_set(4));
        assert!(settings.completes_set(8));
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(TimerPhase::Focus.next_in_cycle(), TimerPhase::Break);
        assert_eq!(TimerPhase::Break.next_in_cycle(), TimerPhase::LongBreak);
        assert_eq!(TimerPhase::LongBreak.next_in_cycle(), TimerPhase::Focus);
    }

    #[test]
    fn test_default_durations() {
        let settings = TimerSettings::default();
        assert_eq!(settings.duration_minutes(TimerPhase::Focus), 25);
        assert_eq!(settings.duration_minutes(TimerPhase::Break), 5);
        assert_eq!(settings.duration_minutes(TimerPhase::LongBreak), 20);
        assert_eq!(settings.rounds(), 4);
    }
}
