//! Delayed, eased value interpolation over arbitrary target attributes.
//!
//! A [`Scheduler`] holds every in-flight tween. Each tween animates one
//! property on a set of targets; every target gets its own *track* with its
//! own start value, end value and start time, so staggered and per-index
//! parameterised animations are a single tween. Per-index values and delays
//! are resolved once, when the tween is scheduled.
//!
//! Begin/complete notifications are returned from [`Scheduler::tick`] as
//! [`TweenEvent`]s carrying a caller-chosen cue, so chaining is done by the
//! caller's driver instead of nested callbacks.

use crate::easing::Easing;
use crate::error::{Result, SplashError};
use smallvec::SmallVec;
use std::fmt;

/// A store of `f32` attributes addressed by (target, property).
pub trait Animatable {
    type Target: Copy + PartialEq + fmt::Debug;
    type Property: Copy + PartialEq + fmt::Debug;

    /// Current value, or `None` when the target no longer exists.
    fn get(&self, target: Self::Target, property: Self::Property) -> Option<f32>;

    /// Write a value. Returns `false` when the target no longer exists.
    fn set(&mut self, target: Self::Target, property: Self::Property, value: f32) -> bool;
}

/// A value that is either shared by every target or computed per target.
pub enum ValueSpec<'a, T> {
    Literal(f32),
    PerIndex(&'a dyn Fn(T, usize) -> f32),
}

impl<T> ValueSpec<'_, T> {
    #[inline]
    fn resolve(&self, target: T, index: usize) -> f32 {
        match self {
            ValueSpec::Literal(v) => *v,
            ValueSpec::PerIndex(f) => f(target, index),
        }
    }
}

impl<T> From<f32> for ValueSpec<'_, T> {
    fn from(v: f32) -> Self {
        ValueSpec::Literal(v)
    }
}

impl<T> fmt::Debug for ValueSpec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSpec::Literal(v) => write!(f, "Literal({v})"),
            ValueSpec::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Reverse direction at each end and run forever. Never completes.
    AlternateForever,
}

/// Notification produced by [`Scheduler::tick`] for tweens that carry a cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenEvent<C> {
    Began { handle: TweenHandle, cue: C },
    Completed { handle: TweenHandle, cue: C },
}

/// Builder describing one tween before it is handed to the scheduler.
pub struct TweenSpec<'a, T, P, C> {
    targets: SmallVec<[T; 4]>,
    property: P,
    to: ValueSpec<'a, T>,
    from: Option<ValueSpec<'a, T>>,
    duration: f64,
    delay: ValueSpec<'a, T>,
    easing: Easing,
    repeat: Repeat,
    on_begin: Option<C>,
    on_complete: Option<C>,
}

impl<'a, T: Copy, P, C> TweenSpec<'a, T, P, C> {
    /// Animate `property` on every target to `to` over `duration` ms.
    pub fn new(
        targets: impl IntoIterator<Item = T>,
        property: P,
        to: ValueSpec<'a, T>,
        duration: f64,
    ) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            property,
            to,
            from: None,
            duration,
            delay: ValueSpec::Literal(0.0),
            easing: Easing::Linear,
            repeat: Repeat::Once,
            on_begin: None,
            on_complete: None,
        }
    }

    /// Shorthand for a literal end value shared by every target.
    pub fn to(targets: impl IntoIterator<Item = T>, property: P, value: f32, duration: f64) -> Self {
        Self::new(targets, property, ValueSpec::Literal(value), duration)
    }

    /// End value computed once per target from `(target, index)`.
    pub fn per_index(
        targets: impl IntoIterator<Item = T>,
        property: P,
        value: &'a dyn Fn(T, usize) -> f32,
        duration: f64,
    ) -> Self {
        Self::new(targets, property, ValueSpec::PerIndex(value), duration)
    }

    /// Explicit start value. When absent the current value is captured as the
    /// track begins.
    pub fn from(mut self, value: f32) -> Self {
        self.from = Some(ValueSpec::Literal(value));
        self
    }

    pub fn from_spec(mut self, from: ValueSpec<'a, T>) -> Self {
        self.from = Some(from);
        self
    }

    /// Delay in ms before every track starts.
    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ValueSpec::Literal(ms as f32);
        self
    }

    /// Per-target delay in ms, e.g. `|_, i| i as f32 * 25.0`.
    pub fn stagger(mut self, delay: &'a dyn Fn(T, usize) -> f32) -> Self {
        self.delay = ValueSpec::PerIndex(delay);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn alternate_forever(mut self) -> Self {
        self.repeat = Repeat::AlternateForever;
        self
    }

    pub fn on_begin(mut self, cue: C) -> Self {
        self.on_begin = Some(cue);
        self
    }

    pub fn on_complete(mut self, cue: C) -> Self {
        self.on_complete = Some(cue);
        self
    }
}

#[derive(Debug)]
struct Track<T> {
    target: T,
    from: Option<f32>,
    to: f32,
    start_at: f64,
    started: bool,
    done: bool,
}

#[derive(Debug)]
struct Tween<T, P, C> {
    handle: TweenHandle,
    property: P,
    tracks: SmallVec<[Track<T>; 4]>,
    duration: f64,
    easing: Easing,
    repeat: Repeat,
    on_begin: Option<C>,
    on_complete: Option<C>,
    begun: bool,
    finished: bool,
}

/// Owner of every in-flight tween.
///
/// All time values are milliseconds on the caller's frame clock. Tweens run
/// to completion unless explicitly cancelled.
pub struct Scheduler<T, P, C> {
    tweens: Vec<Tween<T, P, C>>,
    next_id: u64,
}

impl<T, P, C> Default for Scheduler<T, P, C> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T, P, C> Scheduler<T, P, C>
where
    T: Copy + PartialEq + fmt::Debug,
    P: Copy + PartialEq + fmt::Debug,
    C: Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween starting at `now` (+ per-track delay).
    ///
    /// An empty target set is a no-op and yields `Ok(None)`. A non-positive or
    /// non-finite duration, or a negative delay, is rejected.
    pub fn schedule(
        &mut self,
        now: f64,
        spec: TweenSpec<'_, T, P, C>,
    ) -> Result<Option<TweenHandle>> {
        if !(spec.duration.is_finite() && spec.duration > 0.0) {
            return Err(SplashError::InvalidDuration(spec.duration));
        }
        if spec.targets.is_empty() {
            log::debug!("[tween] empty target set for {:?}, skipped", spec.property);
            return Ok(None);
        }
        let mut tracks = SmallVec::with_capacity(spec.targets.len());
        for (i, &target) in spec.targets.iter().enumerate() {
            let delay = spec.delay.resolve(target, i) as f64;
            if !(delay.is_finite() && delay >= 0.0) {
                return Err(SplashError::InvalidDelay(delay));
            }
            tracks.push(Track {
                target,
                from: spec.from.as_ref().map(|f| f.resolve(target, i)),
                to: spec.to.resolve(target, i),
                start_at: now + delay,
                started: false,
                done: false,
            });
        }
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            handle,
            property: spec.property,
            tracks,
            duration: spec.duration,
            easing: spec.easing,
            repeat: spec.repeat,
            on_begin: spec.on_begin,
            on_complete: spec.on_complete,
            begun: false,
            finished: false,
        });
        Ok(Some(handle))
    }

    /// Evaluate every active tween at `now` and write the results into `store`.
    ///
    /// A track whose target has disappeared is dropped on its own; the rest of
    /// the tween keeps running.
    pub fn tick<S>(&mut self, now: f64, store: &mut S) -> SmallVec<[TweenEvent<C>; 4]>
    where
        S: Animatable<Target = T, Property = P>,
    {
        let mut events = SmallVec::new();
        for tween in &mut self.tweens {
            let mut all_done = true;
            let mut any_started = false;
            for track in &mut tween.tracks {
                if track.done {
                    any_started |= track.started;
                    continue;
                }
                let mut elapsed = now - track.start_at;
                if elapsed < 0.0 {
                    all_done = false;
                    continue;
                }
                if !track.started {
                    track.started = true;
                    if track.from.is_none() {
                        track.from = store.get(track.target, tween.property);
                    }
                }
                any_started = true;
                let Some(from) = track.from else {
                    log::debug!("[tween] target {:?} vanished before start", track.target);
                    track.done = true;
                    continue;
                };
                let value = match tween.repeat {
                    Repeat::Once if elapsed >= tween.duration => {
                        track.done = true;
                        track.to
                    }
                    Repeat::Once => lerp(from, track.to, tween.easing.apply((elapsed / tween.duration) as f32)),
                    Repeat::AlternateForever => {
                        while elapsed >= tween.duration {
                            let to = track.to;
                            track.to = track.from.unwrap_or(to);
                            track.from = Some(to);
                            track.start_at += tween.duration;
                            elapsed -= tween.duration;
                        }
                        let from = track.from.unwrap_or(track.to);
                        lerp(from, track.to, tween.easing.apply((elapsed / tween.duration) as f32))
                    }
                };
                if !store.set(track.target, tween.property, value) {
                    log::debug!("[tween] target {:?} vanished mid-flight", track.target);
                    track.done = true;
                }
                all_done &= track.done;
            }

            if any_started && !tween.begun {
                tween.begun = true;
                if let Some(cue) = tween.on_begin {
                    events.push(TweenEvent::Began {
                        handle: tween.handle,
                        cue,
                    });
                }
            }
            if all_done {
                tween.finished = true;
                // An alternating tween only runs out of tracks by cancellation
                // or vanished targets, so it leaves without a completion.
                if let (Repeat::Once, Some(cue)) = (tween.repeat, tween.on_complete) {
                    events.push(TweenEvent::Completed {
                        handle: tween.handle,
                        cue,
                    });
                }
            }
        }
        self.tweens.retain(|t| !t.finished);
        events
    }

    /// Drop a tween without firing its callbacks.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.handle != handle);
        self.tweens.len() != before
    }

    /// Drop every track animating `target`. Tweens left without tracks
    /// complete normally on the next tick; alternating ones are dropped
    /// silently.
    pub fn cancel_target(&mut self, target: T) {
        for tween in &mut self.tweens {
            tween.tracks.retain(|tr| tr.target != target);
        }
    }

    /// Drop everything, including infinite tweens.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
