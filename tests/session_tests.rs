use chrono::{NaiveDate, NaiveDateTime, Timelike};
use sunfocus::geo::{
    EventFocus, Location, LocationStore, SolarEventKind, SolarEventQuery, SolarReport,
    SunriseSolver,
};
use sunfocus::state::{FileStore, seed_location};
use sunfocus::time::{Clock, SimulatedClock};
use sunfocus::timer::{
    IntervalTimer, PendingWake, TimerOutcome, TimerPhase, TimerSettings, TimerStatus,
};
use tempfile::tempdir;

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Deliver ticks until the armed wake is due, the way the host would.
fn run_to_wake(timer: &mut IntervalTimer<PendingWake>, clock: &SimulatedClock) {
    let wake_at = timer.wake().armed().expect("a wake should be armed");
    while clock.now_local() < wake_at {
        clock.advance(1);
        assert!(timer.tick());
    }
}

#[cfg(test)]
mod interval_timer_session_tests {
    use super::*;

    #[test]
    fn test_autorun_set_of_two_rounds() {
        let clock = SimulatedClock::new(local(2024, 5, 1, 9, 0));
        let settings = TimerSettings::new(1, 1, 1, 2).unwrap();
        let mut timer = IntervalTimer::new(settings, PendingWake::new(), 60).with_autorun(true);

        assert!(matches!(
            timer.start(&clock),
            TimerOutcome::Started {
                phase: TimerPhase::Focus,
                ..
            }
        ));

        // Phase and round count on entering each interval
        let mut visited = vec![(timer.state().phase, timer.state().count)];
        for _ in 0..4 {
            run_to_wake(&mut timer, &clock);
            let summary = timer.summary();
            assert_eq!((summary.minutes_remaining, summary.seconds_remaining), (0, 0));

            match timer.ring(&clock) {
                TimerOutcome::Rang { restarted, .. } => assert!(restarted),
                other => panic!("unexpected outcome {other:?}"),
            }
            visited.push((timer.state().phase, timer.state().count));
        }

        assert_eq!(
            visited,
            vec![
                (TimerPhase::Focus, 1),
                (TimerPhase::Break, 1),
                (TimerPhase::Focus, 2),
                (TimerPhase::LongBreak, 2),
                (TimerPhase::Focus, 3),
            ]
        );
        assert_eq!(clock.now_local(), local(2024, 5, 1, 9, 4));
        assert_eq!(timer.wake().armed(), Some(local(2024, 5, 1, 9, 5)));
        assert_eq!(timer.summary().round_in_set, 1);
    }

    #[test]
    fn test_manual_session_waits_for_start() {
        let clock = SimulatedClock::new(local(2024, 5, 1, 9, 0));
        let mut timer = IntervalTimer::new(TimerSettings::default(), PendingWake::new(), 0);

        timer.start(&clock);
        run_to_wake(&mut timer, &clock);
        let outcome = timer.ring(&clock);

        assert_eq!(
            outcome,
            TimerOutcome::Rang {
                from: TimerPhase::Focus,
                to: TimerPhase::Break,
                restarted: false,
            }
        );
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.wake().armed(), None);

        // Idle shows the full duration of the upcoming break
        let summary = timer.summary();
        assert_eq!(summary.phase, TimerPhase::Break);
        assert_eq!((summary.minutes_remaining, summary.seconds_remaining), (5, 0));

        clock.advance(120);
        assert!(matches!(
            timer.start(&clock),
            TimerOutcome::Started {
                phase: TimerPhase::Break,
                ..
            }
        ));
        assert_eq!(timer.wake().armed(), Some(local(2024, 5, 1, 9, 32)));
    }

    #[test]
    fn test_fourth_focus_earns_long_break() {
        let clock = SimulatedClock::new(local(2024, 5, 1, 9, 0));
        let mut timer =
            IntervalTimer::new(TimerSettings::default(), PendingWake::new(), 0).with_autorun(true);

        timer.start(&clock);
        let mut phases = vec![timer.state().phase];
        for _ in 0..8 {
            run_to_wake(&mut timer, &clock);
            timer.ring(&clock);
            phases.push(timer.state().phase);
        }

        use TimerPhase::*;
        assert_eq!(
            phases,
            vec![Focus, Break, Focus, Break, Focus, Break, Focus, LongBreak, Focus]
        );
        // 4 × 25 + 3 × 5 + 20 minutes
        assert_eq!(clock.now_local(), local(2024, 5, 1, 11, 15));
        assert_eq!(timer.state().count, 5);
    }

    #[test]
    fn test_pause_survives_time_away() {
        let clock = SimulatedClock::new(local(2024, 5, 1, 9, 0));
        let settings = TimerSettings::new(1, 1, 1, 4).unwrap();
        let mut timer = IntervalTimer::new(settings, PendingWake::new(), -300);

        timer.start(&clock);
        for _ in 0..30 {
            clock.advance(1);
            timer.tick();
        }
        assert_eq!(
            timer.pause(),
            TimerOutcome::Paused {
                remainder_seconds: 30
            }
        );
        assert_eq!(timer.wake().armed(), None);

        // Ten minutes away: no ticks, and a stale wake would be ignored
        clock.advance(600);
        assert!(!timer.tick());
        assert_eq!(timer.ring(&clock), TimerOutcome::Ignored);

        timer.resume(&clock);
        let wake_at = timer.wake().armed().unwrap();
        assert_eq!(wake_at.hour(), 9);
        assert_eq!(wake_at.minute(), 11);
        assert_eq!(wake_at.second(), 0);

        run_to_wake(&mut timer, &clock);
        assert!(matches!(timer.ring(&clock), TimerOutcome::Rang { .. }));
        assert_eq!(timer.state().phase, TimerPhase::Break);
    }
}

#[cfg(test)]
mod solar_face_tests {
    use super::*;

    #[test]
    fn test_stored_location_drives_next_event() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path());
        let new_york = Location::from_degrees(40.73, -73.93).unwrap();
        assert!(seed_location(&mut store, new_york).unwrap());

        let mut query = SolarEventQuery::new();
        query.activate(&store).unwrap();
        assert_eq!(query.location(), new_york);

        // 03:00 EDT on the June solstice
        let now = local(2024, 6, 21, 3, 0);
        match query.report(now, -240, &SunriseSolver) {
            SolarReport::NextEvent { kind, at } => {
                assert_eq!(kind, SolarEventKind::Rise);
                assert_eq!(at.date(), now.date());
                assert_eq!(at.hour(), 5);
            }
            other => panic!("expected a sunrise, got {other:?}"),
        }

        assert!(query.toggle_event());
        assert_eq!(query.focus(), EventFocus::Following);
        match query.report(now, -240, &SunriseSolver) {
            SolarReport::NextEvent { kind, at } => {
                assert_eq!(kind, SolarEventKind::Set);
                assert_eq!(at.date(), now.date());
                assert_eq!(at.hour(), 20);
            }
            other => panic!("expected a sunset, got {other:?}"),
        }
    }

    #[test]
    fn test_polar_night_reports_missing_sunrise() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path());
        store
            .save_location(Location::from_degrees(78.22, 15.65).unwrap().pack())
            .unwrap();

        let mut query = SolarEventQuery::new();
        query.activate(&store).unwrap();

        let now = local(2024, 12, 21, 12, 0);
        assert_eq!(
            query.report(now, 60, &SunriseSolver),
            SolarReport::NoEvent {
                kind: SolarEventKind::Rise,
                day: now.date(),
            }
        );
    }

    #[test]
    fn test_empty_store_has_no_location() {
        let dir = tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());

        let mut query = SolarEventQuery::new();
        query.activate(&store).unwrap();

        assert_eq!(
            query.report(local(2024, 6, 21, 3, 0), 0, &SunriseSolver),
            SolarReport::NoLocation
        );
    }
}
