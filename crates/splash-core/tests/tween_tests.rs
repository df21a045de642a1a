use splash_core::{Animatable, Easing, Scheduler, SplashError, TweenEvent, TweenSpec, ValueSpec};
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Value,
}

#[derive(Default)]
struct Store {
    values: Vec<f32>,
    missing: Vec<usize>,
}

impl Store {
    fn with(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
            missing: Vec::new(),
        }
    }
}

impl Animatable for Store {
    type Target = usize;
    type Property = Field;

    fn get(&self, target: usize, _: Field) -> Option<f32> {
        if self.missing.contains(&target) {
            return None;
        }
        self.values.get(target).copied()
    }

    fn set(&mut self, target: usize, _: Field, value: f32) -> bool {
        if self.missing.contains(&target) {
            return false;
        }
        match self.values.get_mut(target) {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }
}

type TestScheduler = Scheduler<usize, Field, u8>;

#[test]
fn linear_tween_is_halfway_at_half_duration() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0]);
    sched
        .schedule(0.0, TweenSpec::to([0], Field::Value, 10.0, 1000.0).from(0.0))
        .unwrap();
    sched.tick(500.0, &mut store);
    assert!((store.values[0] - 5.0).abs() < 1e-4, "got {}", store.values[0]);
}

#[test]
fn tween_is_inert_before_delay_and_exact_after() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[7.0]);
    sched
        .schedule(
            0.0,
            TweenSpec::to([0], Field::Value, 10.0, 300.0)
                .from(0.0)
                .delay(200.0)
                .easing(Easing::OutCubic),
        )
        .unwrap();

    sched.tick(100.0, &mut store);
    assert_eq!(store.values[0], 7.0);
    sched.tick(199.9, &mut store);
    assert_eq!(store.values[0], 7.0);

    sched.tick(499.0, &mut store);
    assert!(store.values[0] < 10.0);

    sched.tick(500.0, &mut store);
    assert_eq!(store.values[0], 10.0);
    assert!(sched.is_empty());
}

#[test]
fn begin_and_complete_fire_exactly_once() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0, 0.0]);
    let handle = sched
        .schedule(
            0.0,
            TweenSpec::to([0, 1], Field::Value, 1.0, 100.0)
                .delay(50.0)
                .on_begin(1)
                .on_complete(2),
        )
        .unwrap()
        .unwrap();

    let mut events = Vec::new();
    for step in 0..=40 {
        events.extend(sched.tick(step as f64 * 10.0, &mut store));
    }
    assert_eq!(
        events,
        vec![
            TweenEvent::Began { handle, cue: 1 },
            TweenEvent::Completed { handle, cue: 2 },
        ]
    );
    assert!(!sched.is_active(handle));
}

#[test]
fn missing_start_value_is_captured_when_the_track_begins() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[3.0]);
    sched
        .schedule(0.0, TweenSpec::to([0], Field::Value, 10.0, 100.0).delay(100.0))
        .unwrap();
    store.values[0] = 4.0;
    sched.tick(100.0, &mut store);
    sched.tick(150.0, &mut store);
    assert!((store.values[0] - 7.0).abs() < 1e-5, "got {}", store.values[0]);
}

#[test]
fn per_index_values_are_resolved_once_at_schedule_time() {
    let calls = Cell::new(0usize);
    let value = |_: usize, i: usize| -> f32 {
        calls.set(calls.get() + 1);
        (i + 1) as f32 * 10.0
    };
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0, 0.0, 0.0]);
    sched
        .schedule(0.0, TweenSpec::per_index([0, 1, 2], Field::Value, &value, 100.0))
        .unwrap();
    assert_eq!(calls.get(), 3);

    for step in 0..=12 {
        sched.tick(step as f64 * 10.0, &mut store);
    }
    assert_eq!(calls.get(), 3);
    assert_eq!(store.values, vec![10.0, 20.0, 30.0]);
}

#[test]
fn stagger_offsets_each_track() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0, 0.0, 0.0]);
    let stagger = |_: usize, i: usize| -> f32 { i as f32 * 100.0 };
    sched
        .schedule(
            0.0,
            TweenSpec::to([0, 1, 2], Field::Value, 1.0, 100.0)
                .from(0.0)
                .stagger(&stagger)
                .on_complete(9),
        )
        .unwrap();
    sched.tick(100.0, &mut store);
    assert_eq!(store.values[0], 1.0);
    assert_eq!(store.values[1], 0.0);
    assert_eq!(store.values[2], 0.0);

    let events = sched.tick(250.0, &mut store);
    assert!(events.is_empty());
    assert_eq!(store.values[1], 1.0);
    assert!((store.values[2] - 0.5).abs() < 1e-5);

    let events = sched.tick(300.0, &mut store);
    assert_eq!(events.len(), 1);
    assert_eq!(store.values[2], 1.0);
}

#[test]
fn empty_targets_are_a_no_op() {
    let mut sched = TestScheduler::new();
    let targets: [usize; 0] = [];
    let handle = sched
        .schedule(0.0, TweenSpec::to(targets, Field::Value, 1.0, 100.0).on_complete(1))
        .unwrap();
    assert!(handle.is_none());
    assert!(sched.is_empty());
}

#[test]
fn non_positive_duration_is_rejected() {
    let mut sched = TestScheduler::new();
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = sched
            .schedule(0.0, TweenSpec::to([0], Field::Value, 1.0, bad))
            .unwrap_err();
        assert!(matches!(err, SplashError::InvalidDuration(_)));
    }
    let err = sched
        .schedule(0.0, TweenSpec::to([0], Field::Value, 1.0, 10.0).delay(-1.0))
        .unwrap_err();
    assert!(matches!(err, SplashError::InvalidDelay(_)));
    assert!(sched.is_empty());
}

#[test]
fn alternating_tween_reverses_and_never_completes() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0]);
    let handle = sched
        .schedule(
            0.0,
            TweenSpec::to([0], Field::Value, 0.3, 100.0)
                .from(1.0)
                .alternate_forever()
                .on_complete(1),
        )
        .unwrap()
        .unwrap();

    assert!(sched.tick(0.0, &mut store).is_empty());
    assert_eq!(store.values[0], 1.0);
    sched.tick(100.0, &mut store);
    assert!((store.values[0] - 0.3).abs() < 1e-6);
    sched.tick(150.0, &mut store);
    assert!((store.values[0] - 0.65).abs() < 1e-5);
    sched.tick(200.0, &mut store);
    assert!((store.values[0] - 1.0).abs() < 1e-6);

    for step in 0..100 {
        let events = sched.tick(200.0 + step as f64 * 37.0, &mut store);
        assert!(events.is_empty());
    }
    assert!(sched.is_active(handle));
}

#[test]
fn vanished_target_does_not_stall_the_tween() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0, 0.0]);
    sched
        .schedule(0.0, TweenSpec::to([0, 1], Field::Value, 1.0, 100.0).on_complete(5))
        .unwrap();
    sched.tick(10.0, &mut store);
    store.missing.push(1);
    sched.tick(50.0, &mut store);
    let events = sched.tick(100.0, &mut store);
    assert!(matches!(events[..], [TweenEvent::Completed { cue: 5, .. }]));
    assert_eq!(store.values[0], 1.0);
}

#[test]
fn cancelling_every_target_still_completes() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0]);
    sched
        .schedule(0.0, TweenSpec::to([0], Field::Value, 1.0, 100.0).on_complete(3))
        .unwrap();
    sched.cancel_target(0);
    let events = sched.tick(1.0, &mut store);
    assert!(matches!(events[..], [TweenEvent::Completed { cue: 3, .. }]));
    assert_eq!(store.values[0], 0.0);
}

#[test]
fn alternating_tween_without_targets_is_dropped_silently() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0, 0.0]);
    let pulse = |target: usize| -> TweenSpec<'static, usize, Field, u8> {
        TweenSpec::to([target], Field::Value, 0.3, 100.0)
            .from(1.0)
            .alternate_forever()
            .on_complete(1)
    };
    let cancelled = sched.schedule(0.0, pulse(0)).unwrap().unwrap();
    let vanished = sched.schedule(0.0, pulse(1)).unwrap().unwrap();
    sched.tick(50.0, &mut store);

    sched.cancel_target(0);
    store.missing.push(1);
    for step in 0..1000 {
        let events = sched.tick(60.0 + step as f64 * 16.0, &mut store);
        assert!(events.is_empty());
    }
    assert!(!sched.is_active(cancelled));
    assert!(!sched.is_active(vanished));
    assert_eq!(sched.len(), 0);
}

#[test]
fn cancel_drops_without_events() {
    let mut sched = TestScheduler::new();
    let mut store = Store::with(&[0.0]);
    let handle = sched
        .schedule(
            0.0,
            TweenSpec::new([0], Field::Value, ValueSpec::Literal(1.0), 100.0).on_complete(1),
        )
        .unwrap()
        .unwrap();
    assert!(sched.cancel(handle));
    assert!(!sched.cancel(handle));
    assert!(sched.tick(200.0, &mut store).is_empty());
    assert_eq!(store.values[0], 0.0);
}
