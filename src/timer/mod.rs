//! Focus/break interval timer.
//!
//! - [`phase`]: phases, durations and round counting
//! - [`scheduler`]: the [`IntervalTimer`] state machine
//! - [`summary`]: render-ready [`TimerSummary`]
//! - [`wake`]: the background wake port and an in-memory implementation

pub mod phase;
pub mod scheduler;
pub mod summary;
pub mod wake;

pub use phase::{TimerPhase, TimerSettings};
pub use scheduler::{IntervalTimer, TimerOutcome, TimerState, TimerStatus};
pub use summary::TimerSummary;
pub use wake::{PendingWake, WakeScheduler};
