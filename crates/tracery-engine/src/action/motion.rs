//! Position-driving actions: straight moves, parabolic jumps, and
//! path-following.

use glam::Vec2;

use crate::action::base::{Action, ActionValue, Timing, TweenValue};
use crate::action::initializer::ActionInitializer;
use crate::action::interpolator::Interpolator;
use crate::components::node::Animatable;
use crate::core::error::{EngineError, EngineResult};
use crate::path::Path;

/// Translate the target in a straight line.
#[derive(Debug, Clone)]
pub struct MoveAction {
    pub timing: Timing,
    value: TweenValue<Vec2>,
}

impl MoveAction {
    pub fn new(to: Vec2, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to),
        }
    }

    pub fn with_from(mut self, from: Vec2) -> Self {
        self.value = self.value.with_from(from);
        self
    }

    pub fn relative(mut self) -> Self {
        self.timing.relative = true;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.timing.interpolator = interpolator;
        self
    }

    pub fn from_initializer(init: &ActionInitializer) -> EngineResult<Self> {
        match init {
            ActionInitializer::Move { timing, from, to } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a move initializer",
            )),
        }
    }
}

impl Action for MoveAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.position(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        target.set_position(v);
        ActionValue::Point(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Move {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
        }
    }
}

/// Translate the target while bouncing it through parabolic arcs.
///
/// The translation term follows the shared relative/reversed law; the bounce
/// term is purely additive on `y` and keeps its sign under `reversed` — only
/// the translation flips. That asymmetry is long-standing observable behavior
/// and is pinned by test rather than smoothed over.
#[derive(Debug, Clone)]
pub struct JumpAction {
    pub timing: Timing,
    value: TweenValue<Vec2>,
    /// Peak height of each arc.
    pub height: f32,
    /// Number of arcs over the whole duration (minimum 1).
    pub jumps: u32,
}

impl JumpAction {
    pub fn new(to: Vec2, height: f32, jumps: u32, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to),
            height,
            jumps: jumps.max(1),
        }
    }

    pub fn with_from(mut self, from: Vec2) -> Self {
        self.value = self.value.with_from(from);
        self
    }

    pub fn relative(mut self) -> Self {
        self.timing.relative = true;
        self
    }

    pub fn from_initializer(init: &ActionInitializer) -> EngineResult<Self> {
        match init {
            ActionInitializer::Jump {
                timing,
                from,
                to,
                height,
                jumps,
            } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                    height: *height,
                    jumps: (*jumps).max(1),
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a jump initializer",
            )),
        }
    }
}

impl Action for JumpAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.position(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let frac = (t * self.jumps as f32).fract();
        let bounce = self.height * 4.0 * frac * (1.0 - frac);

        let mut v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        v.y += bounce;
        target.set_position(v);
        ActionValue::Point(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Jump {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
            height: self.height,
            jumps: self.jumps,
        }
    }
}

/// Drive the target's position along a [`Path`].
///
/// This is the coupling point between the path and action systems: eased
/// normalized time is handed to the path's length-proportional sampler.
#[derive(Debug, Clone)]
pub struct PathAction {
    pub timing: Timing,
    path: Path,
    original: Vec2,
}

impl PathAction {
    pub fn new(path: Path, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            path,
            original: Vec2::ZERO,
        }
    }

    pub fn relative(mut self) -> Self {
        self.timing.relative = true;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.timing.interpolator = interpolator;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn from_initializer(init: &ActionInitializer) -> EngineResult<Self> {
        match init {
            ActionInitializer::PathFollow { timing, path } => Ok(Self {
                timing: timing.build(),
                path: path.clone(),
                original: Vec2::ZERO,
            }),
            _ => Err(EngineError::invalid_initializer(
                "expected a path-follow initializer",
            )),
        }
    }
}

impl Action for PathAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.original = target.position();
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let mut v = self.path.value_at(t);
        if self.timing.relative {
            v += self.original;
            if self.timing.reversed {
                v -= self.path.end_point().unwrap_or(Vec2::ZERO);
            }
        }
        target.set_position(v);
        ActionValue::Point(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::PathFollow {
            timing: (&self.timing).into(),
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::{Node, NodeId};

    #[test]
    fn move_tweens_position() {
        let mut node = Node::new(NodeId(1)).with_pos(Vec2::new(10.0, 10.0));
        let mut action = MoveAction::new(Vec2::new(20.0, 10.0), 1.0);
        action.init_with_target(&mut node).unwrap();

        action.update(0.5, &mut node);
        assert_eq!(node.pos, Vec2::new(15.0, 10.0));
        action.update(1.0, &mut node);
        assert_eq!(node.pos, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn jump_bounces_between_arcs_and_lands_exactly() {
        let mut node = Node::new(NodeId(1));
        let mut action = JumpAction::new(Vec2::new(40.0, 0.0), 10.0, 2, 1.0).relative();
        action.init_with_target(&mut node).unwrap();

        // Peak of the first arc: quarter way through two arcs.
        action.update(0.25, &mut node);
        assert_eq!(node.pos, Vec2::new(10.0, 10.0));

        // Between arcs the bounce returns to the baseline.
        action.update(0.5, &mut node);
        assert!((node.pos.y - 0.0).abs() < 1e-4);

        action.update(1.0, &mut node);
        assert_eq!(node.pos, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn reversed_jump_flips_translation_but_not_bounce() {
        let mut node = Node::new(NodeId(1)).with_pos(Vec2::new(100.0, 0.0));
        let mut action = JumpAction::new(Vec2::new(40.0, 0.0), 10.0, 1, 1.0).relative();
        action.timing.reversed = true;
        action.init_with_target(&mut node).unwrap();

        // Mid-flight: translation runs backwards toward the original
        // position, while the bounce still lifts upward.
        action.update(0.5, &mut node);
        assert_eq!(node.pos, Vec2::new(80.0, 10.0));

        // Lands back on the original position, bounce fully decayed.
        action.update(1.0, &mut node);
        assert_eq!(node.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn path_action_follows_the_path() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(10.0, 10.0));

        let mut node = Node::new(NodeId(1));
        let mut action = PathAction::new(path, 1.0);
        action.init_with_target(&mut node).unwrap();

        action.update(0.0, &mut node);
        assert_eq!(node.pos, Vec2::ZERO);
        action.update(0.5, &mut node);
        assert_eq!(node.pos, Vec2::new(10.0, 0.0));
        action.update(1.0, &mut node);
        assert_eq!(node.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn relative_path_action_offsets_from_original() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).line_to(Vec2::new(10.0, 0.0));

        let mut node = Node::new(NodeId(1)).with_pos(Vec2::new(5.0, 5.0));
        let mut action = PathAction::new(path, 1.0).relative();
        action.init_with_target(&mut node).unwrap();

        action.update(1.0, &mut node);
        assert_eq!(node.pos, Vec2::new(15.0, 5.0));
    }
}
