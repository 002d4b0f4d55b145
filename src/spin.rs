//! Spin animation: eased timeline, session bookkeeping and the Idle/Spinning
//! state machine.
//!
//! The driver never schedules anything itself. Whoever owns the frame loop
//! calls [`SpinDriver::tick`] once per frame, after the previous frame has been
//! drawn, so ticks are strictly sequential.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::WheelConfig;
use crate::geometry::resolve_index_at;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible spins.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Cubic ease-out: fast start, zero slope at the end.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// One armed spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSession {
    pub start_angle: f64,
    pub target_angle: f64,
    pub start_time: Instant,
    pub duration: Duration,
}

/// Result of stepping a session to some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStep {
    pub angle: f64,
    pub progress: f64,
    pub done: bool,
}

/// Fewest whole turns a spin travels.
pub const MIN_TURNS_FLOOR: f64 = 1.0;

fn turn_budget(config: &WheelConfig) -> (f64, f64) {
    let min_turns = if config.min_turns.is_finite() {
        config.min_turns.max(MIN_TURNS_FLOOR)
    } else {
        MIN_TURNS_FLOOR
    };
    let extra_turns = if config.extra_turns.is_finite() {
        config.extra_turns.max(0.0)
    } else {
        0.0
    };
    if min_turns != config.min_turns || extra_turns != config.extra_turns {
        warn!(
            min_turns = config.min_turns,
            extra_turns = config.extra_turns,
            using_min = min_turns,
            using_extra = extra_turns,
            "spin turn budget out of range"
        );
    }
    (min_turns, extra_turns)
}

impl SpinSession {
    /// Draws a target `min_turns + U₁·extra_turns` whole turns plus a random
    /// sub-turn offset ahead of `start_angle`.
    ///
    /// The target is always at least [`MIN_TURNS_FLOOR`] turns ahead: a
    /// smaller, negative or non-finite `min_turns` is raised to it, and a
    /// negative or non-finite `extra_turns` counts as zero.
    pub fn arm(
        start_angle: f64,
        start_time: Instant,
        config: &WheelConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let (min_turns, extra_turns) = turn_budget(config);
        let spins = min_turns + rng.next_unit() * extra_turns;
        let offset = rng.next_unit() * TAU;
        Self {
            start_angle,
            target_angle: start_angle + spins * TAU + offset,
            start_time,
            duration: config.spin_duration,
        }
    }

    /// Pure position of the wheel at `now`. A late `now` clamps to the end.
    pub fn step(&self, now: Instant) -> SpinStep {
        let elapsed = now.saturating_duration_since(self.start_time);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            return SpinStep {
                angle: self.target_angle,
                progress: 1.0,
                done: true,
            };
        }

        let eased = ease_out_cubic(progress);
        SpinStep {
            angle: self.start_angle + (self.target_angle - self.start_angle) * eased,
            progress,
            done: false,
        }
    }
}

/// Maps the frozen final angle to a sector, `None` on an empty wheel.
pub fn resolve_selection(target_angle: f64, count: usize, pointer_angle: f64) -> Option<usize> {
    (count > 0).then(|| resolve_index_at(target_angle, count, pointer_angle))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning(SpinSession),
}

/// Owns the rotation angle and at most one in-flight session.
#[derive(Debug, Clone)]
pub struct SpinDriver {
    angle: f64,
    state: SpinState,
}

impl Default for SpinDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinDriver {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            state: SpinState::Idle,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// Arms a session from the current angle. Ignored while already spinning.
    pub fn start(
        &mut self,
        now: Instant,
        config: &WheelConfig,
        rng: &mut dyn RandomSource,
    ) -> Option<SpinSession> {
        if self.is_spinning() {
            return None;
        }
        let session = SpinSession::arm(self.angle, now, config, rng);
        debug!(
            start = session.start_angle,
            target = session.target_angle,
            duration_ms = session.duration.as_millis() as u64,
            "spin armed"
        );
        self.state = SpinState::Spinning(session);
        Some(session)
    }

    /// Advances to `now`. Returns `None` while idle; on the final step the
    /// angle is frozen at the target and the driver is idle again.
    pub fn tick(&mut self, now: Instant) -> Option<SpinStep> {
        let SpinState::Spinning(session) = self.state else {
            return None;
        };
        let step = session.step(now);
        // never publish a smaller angle than the last one
        self.angle = self.angle.max(step.angle);
        if step.done {
            self.angle = session.target_angle;
            self.state = SpinState::Idle;
        }
        Some(SpinStep {
            angle: self.angle,
            ..step
        })
    }

    /// Drops any session and returns to angle 0.
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.state = SpinState::Idle;
    }
}
