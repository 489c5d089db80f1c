//! Implementation of the `timer` command.
//!
//! Runs an interval timer session against a simulated clock. The clock starts at
//! the current local time and jumps forward a second at a time, so a full set of
//! rounds finishes instantly while every log line carries the simulated time.

use anyhow::Result;
use chrono::Timelike;

use crate::logger::Log;
use crate::time::{Clock, SimulatedClock};
use crate::timer::{IntervalTimer, PendingWake, TimerOutcome, TimerPhase, TimerStatus};

/// Handle `sunfocus timer`.
///
/// # Arguments
/// * `autorun` - Chain intervals without a manual start, on top of the config value
/// * `cycles` - Number of full sets (every round focus plus break) to simulate
/// * `log_file` - Write the output to this file instead of stdout
pub fn handle_timer_command(
    debug_enabled: bool,
    config_dir: Option<String>,
    autorun: bool,
    cycles: u32,
    log_file: Option<String>,
) -> Result<()> {
    let config = super::prepare(debug_enabled, config_dir)?;
    let settings = config.timer_settings()?;
    let (now, offset_minutes) = super::local_now(&config, None)?;

    // Hold the guard for the whole run so the writer thread flushes on exit
    let _log_guard = match log_file {
        Some(path) => {
            println!("Writing simulation log to {path}");
            Some(Log::start_file_logging(path)?)
        }
        None => None,
    };

    let clock = SimulatedClock::new(now.with_nanosecond(0).unwrap_or(now));
    let autorun = config.autorun() || autorun;
    let mut timer =
        IntervalTimer::new(settings, PendingWake::new(), offset_minutes).with_autorun(autorun);
    let intervals = cycles.saturating_mul(timer.settings().rounds()).saturating_mul(2);
    let session_start = clock.now_local();

    stamp(&clock);
    log_version!();
    log_block_start!("Interval timer simulation");
    log_indented!(
        "Focus {}m, break {}m, long break {}m, {} rounds per set",
        settings.duration_minutes(TimerPhase::Focus),
        settings.duration_minutes(TimerPhase::Break),
        settings.duration_minutes(TimerPhase::LongBreak),
        settings.rounds()
    );
    log_indented!(
        "Autorun: {}",
        if autorun { "on" } else { "off, starting each interval manually" }
    );

    for _ in 0..intervals {
        if timer.status() == TimerStatus::Idle {
            log_outcome(&timer.start(&clock), &timer);
        }
        run_until_wake(&mut timer, &clock);
        stamp(&clock);
        log_outcome(&timer.ring(&clock), &timer);
    }

    let summary = timer.summary();
    let elapsed = clock.now_local() - session_start;
    log_block_start!(
        "Session finished after {}h {:02}m",
        elapsed.num_hours(),
        elapsed.num_minutes() % 60
    );
    log_indented!(
        "Focus rounds: {} (round {}/{} of the current set)",
        summary.count,
        summary.round_in_set,
        timer.settings().rounds()
    );
    log_indented!("Next phase: {}", summary.phase.display_name());
    log_end!();

    Log::set_simulated_time(None);
    Ok(())
}

/// Advance the clock until the armed wake is due. Returns at once if nothing is armed.
fn run_until_wake(timer: &mut IntervalTimer<PendingWake>, clock: &SimulatedClock) {
    while timer.wake().armed().is_some() && !timer.wake().is_due(clock.now_local()) {
        clock.advance(1);
        timer.tick();
    }
}

fn stamp(clock: &SimulatedClock) {
    Log::set_simulated_time(Some(clock.now_local().and_utc().timestamp()));
}

fn log_outcome(outcome: &TimerOutcome, timer: &IntervalTimer<PendingWake>) {
    match outcome {
        TimerOutcome::Started { phase, wake_at } => {
            log_block_start!(
                "{} started (round {}/{})",
                phase.display_name(),
                timer.summary().round_in_set,
                timer.settings().rounds()
            );
            log_indented!("Wake armed for {}", wake_at.format("%H:%M:%S"));
        }
        TimerOutcome::Rang {
            from,
            to,
            restarted,
        } => {
            log_block_start!("{} finished", from.display_name());
            if *restarted {
                log_indented!("Autorun: {} started", to.display_name());
                if let Some(wake_at) = timer.wake().armed() {
                    log_indented!("Wake armed for {}", wake_at.format("%H:%M:%S"));
                }
            } else {
                log_indented!("Next: {}", to.display_name());
            }
        }
        other => log_debug!("Unexpected outcome {other:?}"),
    }
}

/// Display detailed help for the timer command.
pub fn display_help() {
    log_version!();
    log_block_start!("timer - Simulate an interval timer session");
    log_block_start!("Usage: sunfocus timer [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-a, --autorun       Start each interval as soon as the previous one ends");
    log_indented!("-n, --cycles <N>    Number of full sets to simulate (default 1)");
    log_indented!("-l, --log <file>    Write the simulation output to a file");
    log_block_start!("Durations, rounds and autorun come from the configuration file");
    log_block_start!("Examples:");
    log_indented!("sunfocus timer");
    log_indented!("sunfocus timer --autorun --cycles 2 --log session.log");
    log_end!();
}
