//! Action base: the timing state machine and the shared value-resolution
//! rules every concrete action builds on.
//!
//! An action never reads the wall clock. The scheduler feeds elapsed seconds
//! through [`Action::step`]; [`Timing::advance`] folds in delay, speed and
//! repeat cycles and reports a normalized time, which the interpolator shapes
//! and [`Action::update`] applies to the target.

use glam::Vec2;

use crate::action::initializer::ActionInitializer;
use crate::action::interpolator::Interpolator;
use crate::components::color::Color;
use crate::components::node::Animatable;
use crate::core::error::EngineResult;

/// Lifecycle of an action.
///
/// `Finished` and `Stopped` are terminal; `Paused` suspends time advancement
/// without losing the elapsed accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Created,
    Initialized,
    Running,
    Paused,
    Finished,
    Stopped,
}

/// One advance of an action's clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Nothing to apply: paused, terminal, or still inside the delay.
    Idle,
    /// Mid-flight at the given normalized time.
    Run(f32),
    /// Crossed the end this advance; normalized time is clamped to 1.0.
    Done(f32),
}

/// The value an action wrote to its target during one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionValue {
    /// No property was written this tick.
    None,
    Scalar(f32),
    Point(Vec2),
    Color(Color),
    Frame(u32),
}

/// Timing and playback attributes shared by every action kind.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Seconds for one playback cycle.
    pub duration: f32,
    /// Seconds to wait before the first cycle.
    pub delay: f32,
    /// Time multiplier (2.0 plays twice as fast).
    pub speed: f32,
    /// Number of cycles (minimum 1).
    pub repeat: u32,
    /// Whether applied values add to the target's captured original value.
    pub relative: bool,
    /// Whether a relative action subtracts its end value, landing back on
    /// the original at normalized time 1.0.
    pub reversed: bool,
    pub interpolator: Interpolator,
    /// Cancellation tag; the manager assigns one when empty.
    pub tag: Option<String>,
    elapsed: f32,
    state: ActionState,
}

impl Timing {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            speed: 1.0,
            repeat: 1,
            relative: false,
            reversed: false,
            interpolator: Interpolator::default(),
            tag: None,
            elapsed: 0.0,
            state: ActionState::Created,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ActionState) {
        self.state = state;
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ActionState::Finished | ActionState::Stopped)
    }

    /// Internal elapsed time (already speed-scaled), in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Wall-clock seconds this action has consumed so far.
    pub fn consumed_seconds(&self) -> f32 {
        if self.speed <= 0.0 {
            0.0
        } else {
            self.elapsed / self.speed
        }
    }

    /// Wall-clock seconds from start to finish: delay plus all cycles,
    /// divided by playback speed.
    pub fn total_duration(&self) -> f32 {
        if self.speed <= 0.0 {
            return f32::INFINITY;
        }
        (self.delay + self.duration * self.repeat.max(1) as f32) / self.speed
    }

    /// Advance the clock by `dt` seconds and report the resulting progress.
    ///
    /// Once the final cycle completes the state flips to `Finished` and the
    /// reported time is clamped to 1.0; later advances are `Idle`.
    pub fn advance(&mut self, dt: f32) -> Progress {
        match self.state {
            ActionState::Paused | ActionState::Finished | ActionState::Stopped => {
                return Progress::Idle
            }
            _ => {}
        }

        self.elapsed += dt * self.speed;
        let active = self.elapsed - self.delay;
        if active < 0.0 {
            return Progress::Idle;
        }
        self.state = ActionState::Running;

        let cycles = self.repeat.max(1) as f32;
        if self.duration <= 0.0 || active >= self.duration * cycles {
            self.state = ActionState::Finished;
            return Progress::Done(1.0);
        }
        Progress::Run((active / self.duration).fract())
    }

    pub fn pause(&mut self) {
        if !self.is_done() {
            self.state = ActionState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == ActionState::Paused {
            self.state = ActionState::Running;
        }
    }

    /// Shape a normalized time through this action's interpolator.
    pub fn eased(&self, t: f32) -> f32 {
        self.interpolator.apply(t)
    }
}

/// Values an action can tween: scalars, points, colors.
pub trait TweenOps: Copy {
    fn zero() -> Self;
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl TweenOps for f32 {
    fn zero() -> Self {
        0.0
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl TweenOps for Vec2 {
    fn zero() -> Self {
        Vec2::ZERO
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl TweenOps for Color {
    fn zero() -> Self {
        Color::new(0.0, 0.0, 0.0)
    }

    fn add(self, other: Self) -> Self {
        Color::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    fn sub(self, other: Self) -> Self {
        Color::new(self.r - other.r, self.g - other.g, self.b - other.b)
    }

    fn lerp_to(self, to: Self, t: f32) -> Self {
        Color::new(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
        )
    }
}

/// From/to pair with start-value resolution and the relative/reversed law.
///
/// The start value resolves at capture time: an explicit `from` wins; without
/// one, a relative tween starts from zero (pure delta) and an absolute tween
/// starts from the target's current value.
#[derive(Debug, Clone, Copy)]
pub struct TweenValue<T: TweenOps> {
    pub from: Option<T>,
    pub to: T,
    start: T,
    original: T,
}

impl<T: TweenOps> TweenValue<T> {
    pub fn new(to: T) -> Self {
        Self {
            from: None,
            to,
            start: T::zero(),
            original: T::zero(),
        }
    }

    pub fn with_from(mut self, from: T) -> Self {
        self.from = Some(from);
        self
    }

    /// Capture the target's current value and resolve the effective start.
    pub fn capture(&mut self, current: T, relative: bool) {
        self.original = current;
        self.start = match self.from {
            Some(f) => f,
            None if relative => T::zero(),
            None => current,
        };
    }

    /// The target value captured at init time.
    pub fn original(&self) -> T {
        self.original
    }

    /// Interpolated value at eased progress, composed with the original for
    /// relative playback. A relative+reversed tween subtracts the end value
    /// so it lands back on the original at progress 1.0.
    pub fn value_at(&self, eased: f32, relative: bool, reversed: bool) -> T {
        let mut v = self.start.lerp_to(self.to, eased);
        if relative {
            v = v.add(self.original);
            if reversed {
                v = v.sub(self.to);
            }
        }
        v
    }
}

/// A time-driven mutator of one target property.
///
/// Concrete actions implement the value logic (`on_init`, `update`,
/// `initializer`); the provided methods drive the state machine.
pub trait Action {
    fn timing(&self) -> &Timing;
    fn timing_mut(&mut self) -> &mut Timing;

    /// Capture start values from the target. Runs once, at scheduling time.
    /// Fails fast when the target lacks a needed capability.
    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()>;

    /// Apply eased normalized time `t` in [0, 1] to the target and return
    /// the value written.
    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue;

    /// Hook invoked by `stop`, e.g. to restore a pre-animation frame.
    fn on_stop(&mut self, _target: &mut dyn Animatable) {}

    /// Reconstructible description of this action.
    fn initializer(&self) -> ActionInitializer;

    // -- provided drivers --

    fn init_with_target(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.on_init(target)?;
        self.timing_mut().set_state(ActionState::Initialized);
        Ok(())
    }

    /// Advance by `dt` seconds and apply the resulting progress, if any.
    fn step(&mut self, dt: f32, target: &mut dyn Animatable) -> ActionValue {
        match self.timing_mut().advance(dt) {
            Progress::Idle => ActionValue::None,
            Progress::Run(t) | Progress::Done(t) => {
                let eased = self.timing().eased(t);
                self.update(eased, target)
            }
        }
    }

    /// Stop playback permanently, running the stop hook.
    fn stop(&mut self, target: &mut dyn Animatable) {
        if !self.timing().is_done() {
            self.timing_mut().set_state(ActionState::Stopped);
            self.on_stop(target);
        }
    }

    fn pause(&mut self) {
        self.timing_mut().pause();
    }

    fn resume(&mut self) {
        self.timing_mut().resume();
    }

    fn is_done(&self) -> bool {
        self.timing().is_done()
    }
}
