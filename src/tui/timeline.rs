//! Single-clock animation timeline.
//!
//! A [`Timeline`] holds cues scheduled at absolute offsets from a start
//! instant; the owner asks for due cues each frame. A [`Tween`] maps the
//! same clock onto an eased property value. Nothing here spawns tasks or
//! owns timers: cancelling is just dropping the pending entries.

use std::time::Duration;
use tracing::{debug, instrument};

/// A cue waiting to fire.
#[derive(Debug, Clone)]
struct Scheduled<A> {
    at: Duration,
    seq: u64,
    action: A,
}

/// Ordered `(offset, action)` list driven by an external clock.
///
/// Cues due at the same offset fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    pending: Vec<Scheduled<A>>,
    next_seq: u64,
}

impl<A> Timeline<A> {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedules `action` to fire once the clock reaches `at`.
    pub fn schedule(&mut self, at: Duration, action: A) {
        self.pending.push(Scheduled {
            at,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Removes and returns every cue due at `now`, in firing order.
    pub fn due(&mut self, now: Duration) -> Vec<(Duration, A)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|cue| cue.at <= now);
        self.pending = rest;
        due.sort_by_key(|cue| (cue.at, cue.seq));
        due.into_iter().map(|cue| (cue.at, cue.action)).collect()
    }

    /// Drops every pending cue. Returns how many were dropped.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        debug!(dropped, "Timeline cancelled");
        dropped
    }

    /// Number of cues still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Easing curves, matching the platform interpolators the splash was
/// designed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    AccelerateDecelerate,
    /// Runs past the target and settles back (tension 2).
    Overshoot,
    /// Drops onto the target and bounces.
    Bounce,
}

impl Easing {
    const OVERSHOOT_TENSION: f32 = 2.0;

    /// Maps linear progress `t` in `[0, 1]` onto eased progress.
    ///
    /// Overshoot may leave `[0, 1]` mid-flight; all curves end at 1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
            Easing::Overshoot => {
                let tension = Self::OVERSHOOT_TENSION;
                let t = t - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
            Easing::Bounce => {
                fn drop(t: f32) -> f32 {
                    t * t * 8.0
                }
                let t = t * 1.1226;
                if t < 0.3535 {
                    drop(t)
                } else if t < 0.7408 {
                    drop(t - 0.54719) + 0.7
                } else if t < 0.9644 {
                    drop(t - 0.8526) + 0.9
                } else {
                    drop(t - 1.0435) + 0.95
                }
            }
        }
    }
}

/// What a tween does once its duration elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Play once and hold the final value.
    Once,
    /// Loop forever from the start.
    Restart,
    /// Loop forever, alternating direction.
    Reverse,
}

/// Eased interpolation across evenly spaced keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: Duration,
    duration: Duration,
    keyframes: Vec<f32>,
    easing: Easing,
    repeat: Repeat,
}

impl Tween {
    /// Creates a one-shot tween. Needs at least one keyframe.
    pub fn new(
        start: Duration,
        duration: Duration,
        keyframes: impl Into<Vec<f32>>,
        easing: Easing,
    ) -> Self {
        Self {
            start,
            duration,
            keyframes: keyframes.into(),
            easing,
            repeat: Repeat::Once,
        }
    }

    /// Sets the repeat behaviour.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Curve applied within each keyframe segment.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Returns true for tweens that never finish.
    pub fn is_infinite(&self) -> bool {
        self.repeat != Repeat::Once
    }

    /// Returns true once a one-shot tween has reached its last keyframe.
    pub fn is_finished(&self, now: Duration) -> bool {
        !self.is_infinite() && now >= self.start + self.duration
    }

    /// Value at `now`, or `None` before the tween starts.
    pub fn value_at(&self, now: Duration) -> Option<f32> {
        let elapsed = now.checked_sub(self.start)?;
        let first = *self.keyframes.first()?;

        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            let cycles = elapsed.as_secs_f32() / self.duration.as_secs_f32();
            match self.repeat {
                Repeat::Once => cycles.min(1.0),
                Repeat::Restart => cycles.fract(),
                Repeat::Reverse => {
                    let frac = cycles.fract();
                    if (cycles as u64) % 2 == 1 {
                        1.0 - frac
                    } else {
                        frac
                    }
                }
            }
        };

        let eased = self.easing.apply(fraction);
        if self.keyframes.len() == 1 {
            return Some(first);
        }

        let segments = (self.keyframes.len() - 1) as f32;
        let scaled = eased * segments;
        let idx = (scaled.floor().max(0.0) as usize).min(self.keyframes.len() - 2);
        let local = scaled - idx as f32;
        let (a, b) = (self.keyframes[idx], self.keyframes[idx + 1]);
        Some(a + (b - a) * local)
    }
}
