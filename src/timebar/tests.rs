//! Run-level tests for the time bar, driven by a virtual clock.

use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualScheduler, Scheduler};
    use bubbletea_rs::{Cmd, Model as BubbleTeaModel};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct Counter {
        hits: AtomicUsize,
    }

    impl Counter {
        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    impl CompletionDelegate for Counter {
        fn on_timer_finished(&self) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Records everything scheduled without ever delivering it.
    #[derive(Debug, Default)]
    struct Recorder {
        sent: Mutex<Vec<ScheduledMsg>>,
    }

    impl Recorder {
        fn last_tick(&self) -> Option<ScheduledMsg> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|m| matches!(m, ScheduledMsg::Tick(_)))
                .copied()
        }
    }

    impl Scheduler for Recorder {
        fn schedule_once(&self, _after: Duration, msg: ScheduledMsg) -> Option<Cmd> {
            self.sent.lock().unwrap().push(msg);
            None
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn setup(extra: &[TimebarOption]) -> (Model, ManualScheduler, Arc<Counter>) {
        let clock = ManualScheduler::new();
        let mut bar = new(&[
            with_size(20, 10),
            with_label(),
            with_easing(Easing::Linear),
            with_scheduler(Arc::new(clock.clone())),
        ]);
        for opt in extra {
            match opt {
                TimebarOption::WithSize(w, h) => bar.set_size(*w, *h),
                TimebarOption::WithLabel(show) => bar.set_label_visible(*show),
                TimebarOption::WithPadding(p) => bar.set_padding(*p),
                TimebarOption::WithBoundaryWidth(w) => bar.set_boundary_width(*w),
                _ => {}
            }
        }
        let counter = Arc::new(Counter::default());
        bar.set_delegate(&counter);
        (bar, clock, counter)
    }

    fn run_for(bar: &mut Model, clock: &ManualScheduler, by: Duration) {
        clock.advance(by, |msg| {
            bar.update(msg);
        });
    }

    #[test]
    fn test_zero_duration_finishes_within_one_scheduling_turn() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(Duration::ZERO, Duration::ZERO);
        assert_eq!(counter.hits(), 0);

        run_for(&mut bar, &clock, Duration::ZERO);

        assert_eq!(counter.hits(), 1);
        assert_eq!(bar.fill_rect().height, 0);
        assert_eq!(bar.label_text(), Some("0"));
        assert!(!bar.is_running());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_twenty_one_seconds_with_two_second_delay() {
        let (mut bar, clock, counter) = setup(&[]);
        let full_height = bar.fill_rect().height;

        bar.start_timer(secs(21), secs(2));
        assert_eq!(bar.label_text(), Some("21"));

        // A delay of exactly 2s is not above the threshold: ticking starts now.
        run_for(&mut bar, &clock, secs(1));
        assert_eq!(bar.label_text(), Some("20"));

        // The shrink has not started yet.
        assert_eq!(bar.fill_rect().height, full_height);

        run_for(&mut bar, &clock, Duration::from_millis(19_999));
        assert_eq!(bar.label_text(), Some("1"));
        assert_eq!(counter.hits(), 0);

        run_for(&mut bar, &clock, Duration::from_millis(1));
        assert_eq!(bar.label_text(), Some("0"));
        assert!(!bar.is_ticking());
        // Completion counts the duration only; the shrink still has 2s to go.
        assert_eq!(counter.hits(), 1);
        assert!(bar.is_animating());
        assert!(bar.fill_rect().height > 0);
        assert!(bar.fill_rect().height < full_height);

        run_for(&mut bar, &clock, secs(2));
        assert!(!bar.is_animating());
        assert_eq!(bar.fill_rect().height, 0);
        assert!(!bar.is_running());
        assert_eq!(counter.hits(), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_countdown_start_boundary_at_two_seconds() {
        assert_eq!(countdown_start_delay(secs(0)), Duration::ZERO);
        assert_eq!(countdown_start_delay(secs(2)), Duration::ZERO);
        assert_eq!(
            countdown_start_delay(Duration::from_millis(2001)),
            Duration::from_millis(1001)
        );
        assert_eq!(countdown_start_delay(secs(3)), secs(2));
    }

    #[test]
    fn test_countdown_starts_one_second_early_for_long_delays() {
        let (mut bar, clock, _counter) = setup(&[]);
        bar.start_timer(secs(10), secs(3));

        // Ticking begins at 2s, so the first decrement lands at 3s.
        run_for(&mut bar, &clock, Duration::from_millis(2_999));
        assert_eq!(bar.label_text(), Some("10"));

        run_for(&mut bar, &clock, Duration::from_millis(1));
        assert_eq!(bar.label_text(), Some("9"));
    }

    #[test]
    fn test_restart_mid_run_notifies_once_with_one_countdown() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(secs(10), Duration::ZERO);
        run_for(&mut bar, &clock, secs(5));
        assert_eq!(bar.label_text(), Some("5"));

        bar.start_timer(secs(10), Duration::ZERO);
        assert_eq!(bar.label_text(), Some("10"));

        let mut seen = Vec::new();
        for _ in 0..10 {
            run_for(&mut bar, &clock, secs(1));
            seen.push(bar.label_text().unwrap_or_default().to_string());
            if seen.len() == 5 {
                // The first run would have finished by now.
                assert_eq!(counter.hits(), 0);
            }
        }

        let expected: Vec<String> = (0..10).rev().map(|n| n.to_string()).collect();
        assert_eq!(seen, expected);
        assert_eq!(counter.hits(), 1);

        run_for(&mut bar, &clock, secs(30));
        assert_eq!(counter.hits(), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_restart_resets_fill_to_full() {
        let (mut bar, clock, _counter) = setup(&[]);
        let full = bar.fill_rect();

        bar.start_timer(secs(4), Duration::ZERO);
        run_for(&mut bar, &clock, secs(3));
        assert!(bar.fill_rect().height < full.height);

        bar.start_timer(secs(4), secs(1));
        assert_eq!(bar.fill_rect(), full);
    }

    #[test]
    fn test_messages_from_superseded_run_are_ignored() {
        let recorder = Arc::new(Recorder::default());
        let mut bar = new(&[with_size(20, 10), with_label(), with_scheduler(recorder.clone())]);

        bar.start_timer(secs(10), Duration::ZERO);
        let stale = recorder.last_tick().expect("first run scheduled a tick");

        bar.start_timer(secs(10), Duration::ZERO);
        bar.update(stale.into_msg());
        assert_eq!(bar.label_text(), Some("10"));

        let current = recorder.last_tick().expect("second run scheduled a tick");
        bar.update(current.into_msg());
        assert_eq!(bar.label_text(), Some("9"));
    }

    #[test]
    fn test_messages_for_other_bars_are_ignored() {
        let recorder = Arc::new(Recorder::default());
        let mut bar = new(&[with_size(20, 10), with_label(), with_scheduler(recorder.clone())]);
        let mut other = new(&[with_size(20, 10), with_label()]);

        bar.start_timer(secs(10), Duration::ZERO);
        other.start_timer(secs(10), Duration::ZERO);

        let tick = recorder.last_tick().expect("tick scheduled");
        assert!(other.update(tick.into_msg()).is_none());
        assert_eq!(other.label_text(), Some("10"));
    }

    #[test]
    fn test_tick_after_countdown_ended_is_noop() {
        let recorder = Arc::new(Recorder::default());
        let mut bar = new(&[with_size(20, 10), with_label(), with_scheduler(recorder.clone())]);

        bar.start_timer(secs(1), Duration::ZERO);
        let tick = recorder.last_tick().expect("tick scheduled");

        assert!(bar.update(tick.into_msg()).is_none());
        assert_eq!(bar.label_text(), Some("0"));
        assert!(!bar.is_ticking());

        assert!(bar.update(tick.into_msg()).is_none());
        assert_eq!(bar.label_text(), Some("0"));
        assert_eq!(bar.remaining_seconds(), 0);
    }

    #[test]
    fn test_sub_second_duration_schedules_no_ticks() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(Duration::from_millis(900), Duration::ZERO);
        assert_eq!(bar.label_text(), Some("0"));
        assert!(!bar.is_ticking());

        run_for(&mut bar, &clock, secs(1));
        assert_eq!(counter.hits(), 1);
        assert!(!bar.is_running());
    }

    #[test]
    fn test_stop_cancels_everything() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(secs(10), Duration::ZERO);
        run_for(&mut bar, &clock, secs(1));
        let fill = bar.fill_rect();

        bar.stop();
        assert!(!bar.is_running());
        assert_eq!(clock.pending(), 0);

        run_for(&mut bar, &clock, secs(30));
        assert_eq!(counter.hits(), 0);
        assert_eq!(bar.label_text(), Some("9"));
        assert_eq!(bar.fill_rect(), fill);
    }

    #[test]
    fn test_dropped_delegate_is_skipped() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(secs(1), Duration::ZERO);
        drop(counter);

        run_for(&mut bar, &clock, secs(2));
        assert!(!bar.is_running());
    }

    #[test]
    fn test_cleared_delegate_is_not_notified() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.clear_delegate();
        bar.start_timer(secs(1), Duration::ZERO);

        run_for(&mut bar, &clock, secs(2));
        assert_eq!(counter.hits(), 0);
    }

    #[test]
    fn test_unsized_bar_runs_without_panicking() {
        let (mut bar, clock, counter) = setup(&[TimebarOption::WithSize(0, 0)]);
        bar.start_timer(secs(3), secs(1));

        run_for(&mut bar, &clock, secs(5));
        assert_eq!(counter.hits(), 1);
        assert!(bar.fill_rect().is_empty());
        assert_eq!(bar.view(), "");
    }

    #[test]
    fn test_padding_change_mid_run() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer(secs(10), Duration::ZERO);
        run_for(&mut bar, &clock, secs(5));
        let top_before = bar.fill_rect().y;

        bar.set_padding(2);
        let fill = bar.fill_rect();
        assert_eq!(fill.x, 1 + 2);
        assert_eq!(fill.width, 20 - 2 * 3);
        // The animated top edge is not reset by the padding change.
        assert_eq!(fill.y, top_before);

        run_for(&mut bar, &clock, secs(6));
        assert_eq!(counter.hits(), 1);
        assert_eq!(bar.fill_rect().height, 0);
        assert_eq!(bar.fill_rect().x, 3);
    }

    #[test]
    fn test_fill_inset_equals_boundary_plus_padding() {
        let mut bar = new(&[with_size(40, 30)]);
        for boundary in 0..6 {
            for padding in 0..6 {
                bar.set_boundary_width(boundary);
                bar.set_padding(padding);
                let fill = bar.fill_rect();
                let inset = (boundary + padding) as u16;
                assert_eq!(fill.x, inset);
                assert_eq!(fill.y, inset);
                assert_eq!(40 - fill.right(), inset);
                assert_eq!(30 - fill.bottom(), inset);
            }
        }
    }

    #[test]
    fn test_negative_widths_clamp_to_zero() {
        let mut bar = new(&[with_size(10, 10)]);
        for value in [-1, -7, i32::MIN] {
            bar.set_boundary_width(value);
            bar.set_padding(value);
            assert_eq!(bar.boundary_width(), 0);
            assert_eq!(bar.padding(), 0);
            assert_eq!(bar.fill_rect(), Rect::from_size(10, 10));
        }
    }

    #[test]
    fn test_oversized_widths_yield_empty_regions() {
        let mut bar = new(&[with_size(10, 6)]);
        bar.set_boundary_width(100_000);
        assert_eq!(bar.boundary_width(), u16::MAX);
        assert!(bar.frames().padding.is_empty());

        bar.set_boundary_width(2);
        bar.set_padding(3);
        assert!(bar.fill_rect().is_empty());
        assert_eq!(bar.view().lines().count(), 6);
    }

    #[test]
    fn test_reapplying_configuration_is_idempotent() {
        let mut bar = new(&[with_size(20, 10), with_label()]);
        let frames = bar.frames();

        bar.set_boundary_width(1);
        bar.set_padding(1);
        bar.set_boundary_width(1);
        assert_eq!(bar.frames(), frames);
    }

    #[test]
    fn test_color_setters_leave_geometry_alone() {
        let mut bar = new(&[with_size(20, 10)]);
        let frames = bar.frames();

        bar.set_boundary_color("#111111");
        bar.set_padding_color("#222222");
        bar.set_fill_color("#333333");
        bar.set_label_color("#444444");

        assert_eq!(bar.frames(), frames);
        assert_eq!(bar.boundary_color(), "#111111");
        assert_eq!(bar.padding_color(), "#222222");
        assert_eq!(bar.fill_color(), "#333333");
        assert_eq!(bar.label_color(), "#444444");
    }

    #[test]
    fn test_config_and_options_configure_alike() {
        let config = Config {
            boundary_width: -2,
            padding: 3,
            show_label: true,
            width: 20,
            height: 10,
            fill_color: "#00FF00".to_string(),
            ..Config::default()
        };
        let from_description = from_config(&config);
        let from_options = new(&[
            with_size(20, 10),
            with_boundary_width(-2),
            with_padding(3),
            with_fill_color("#00FF00"),
            with_label(),
        ]);

        assert_eq!(from_description.frames(), from_options.frames());
        assert_eq!(from_description.boundary_width(), 0);
        assert_eq!(from_description.fill_color(), "#00FF00");
        assert!(from_description.label_visible());
    }

    #[test]
    fn test_defaults() {
        let bar = Model::default();
        assert_eq!(bar.boundary_color(), "#0000FF");
        assert_eq!(bar.padding_color(), "#FFFFFF");
        assert_eq!(bar.fill_color(), "#FF0000");
        assert_eq!(bar.boundary_width(), 1);
        assert_eq!(bar.padding(), 1);
        assert_eq!(bar.easing(), Easing::EaseInOut);
        assert_eq!(bar.label_text(), None);
        assert!(!bar.is_running());
    }

    #[test]
    fn test_unique_ids() {
        let a = new(&[]);
        let b = new(&[]);
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    #[test]
    fn test_start_timer_secs_clamps_bad_input() {
        let (mut bar, clock, counter) = setup(&[]);
        bar.start_timer_secs(-5.0, f64::NAN);
        assert_eq!(bar.label_text(), Some("0"));

        run_for(&mut bar, &clock, Duration::ZERO);
        assert_eq!(counter.hits(), 1);
        assert_eq!(bar.fill_rect().height, 0);
    }

    #[test]
    fn test_start_timer_secs_truncates_label() {
        let (mut bar, _clock, _counter) = setup(&[]);
        bar.start_timer_secs(7.9, 0.5);
        assert_eq!(bar.label_text(), Some("7"));
        assert_eq!(bar.remaining_seconds(), 7);
    }

    #[test]
    fn test_hidden_label_runs_without_countdown() {
        let (mut bar, clock, counter) = setup(&[TimebarOption::WithLabel(false)]);
        bar.start_timer(secs(5), Duration::ZERO);
        assert_eq!(bar.label_text(), None);
        assert!(!bar.is_ticking());

        run_for(&mut bar, &clock, secs(5));
        assert_eq!(counter.hits(), 1);
        assert!(!bar.is_running());
    }

    #[test]
    fn test_ease_in_out_lags_linear_early_on() {
        let (mut linear, linear_clock, _a) = setup(&[]);
        let (mut eased, eased_clock, _b) = setup(&[]);
        eased.set_easing(Easing::EaseInOut);

        linear.start_timer(secs(10), Duration::ZERO);
        eased.start_timer(secs(10), Duration::ZERO);
        run_for(&mut linear, &linear_clock, secs(2));
        run_for(&mut eased, &eased_clock, secs(2));

        assert!(eased.fill_rect().height >= linear.fill_rect().height);
    }

    #[test]
    fn test_standalone_init_mirrors_host_screen() {
        let (bar, cmd) = <Model as BubbleTeaModel>::init();
        assert!(cmd.is_some());
        assert_eq!(bar.width, 20);
        assert_eq!(bar.height, 10);
        assert_eq!(bar.label_text(), Some("21"));
        assert!(bar.is_running());
    }
}
