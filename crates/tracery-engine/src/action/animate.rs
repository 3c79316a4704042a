//! Frame-sequence playback as an action.
//!
//! Unlike the scalar tweens there is no from/to pair: eased time picks a
//! discrete frame out of an [`Animation`] definition and applies it through
//! the target's frame capability. Targets without that capability are
//! rejected when the action binds, not mid-playback.

use crate::action::base::{Action, ActionValue, Timing};
use crate::action::initializer::ActionInitializer;
use crate::components::animation::Animation;
use crate::components::node::Animatable;
use crate::core::error::{EngineError, EngineResult};

/// Play an [`Animation`]'s frames on a frame-displayable target.
#[derive(Debug, Clone)]
pub struct AnimateAction {
    pub timing: Timing,
    animation: Animation,
    original_frame: u32,
}

impl AnimateAction {
    /// Build from an animation definition; the duration derives from the
    /// definition's frame count, frame duration and loop count.
    pub fn new(animation: Animation) -> Self {
        Self {
            timing: Timing::new(animation.total_duration()),
            animation,
            original_frame: 0,
        }
    }

    /// Rebuild from an initializer. This is the second of the two explicit
    /// constructors; there is no runtime type inspection on the argument.
    pub fn from_initializer(init: &ActionInitializer) -> EngineResult<Self> {
        match init {
            ActionInitializer::Animate { timing, animation } => Ok(Self {
                timing: timing.build(),
                animation: animation.clone(),
                original_frame: 0,
            }),
            _ => Err(EngineError::invalid_initializer(
                "expected an animate initializer",
            )),
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }
}

impl Action for AnimateAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        let display = target.frame_display().ok_or_else(|| {
            EngineError::missing_capability(
                "animate action requires a frame-displayable target",
            )
        })?;
        self.original_frame = display.current_frame();
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let count = self.animation.frame_count();
        if count == 0 {
            return ActionValue::None;
        }
        let Some(display) = target.frame_display() else {
            return ActionValue::None;
        };

        // Map eased time over all loops, clamp the final instant onto the
        // last frame instead of wrapping back to the first.
        let total = count * self.animation.loops.max(1) as usize;
        let raw = (t.clamp(0.0, 1.0) * total as f32).floor() as usize;
        let idx = raw.min(total - 1) % count;
        let frame = self.animation.frames[idx];
        display.set_current_frame(frame);
        ActionValue::Frame(frame)
    }

    fn on_stop(&mut self, target: &mut dyn Animatable) {
        if self.animation.restore_original_frame {
            if let Some(display) = target.frame_display() {
                display.set_current_frame(self.original_frame);
            }
        }
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Animate {
            timing: (&self.timing).into(),
            animation: self.animation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::{Node, NodeId};
    use crate::components::sprite::SpriteState;

    fn sprite_node() -> Node {
        Node::new(NodeId(1)).with_sprite(SpriteState::default().with_frame(9))
    }

    #[test]
    fn binding_to_a_bare_node_fails_fast() {
        let mut node = Node::new(NodeId(1));
        let mut action = AnimateAction::new(Animation::strip(0, 4, 10.0));
        let err = action.init_with_target(&mut node).unwrap_err();
        assert!(err.to_string().contains("missing capability"));
    }

    #[test]
    fn frames_step_through_the_sequence() {
        let mut node = sprite_node();
        let mut action = AnimateAction::new(Animation::strip(0, 4, 10.0));
        action.init_with_target(&mut node).unwrap();

        assert_eq!(action.update(0.0, &mut node), ActionValue::Frame(0));
        assert_eq!(action.update(0.30, &mut node), ActionValue::Frame(1));
        assert_eq!(action.update(0.60, &mut node), ActionValue::Frame(2));
        // The final instant holds the last frame rather than wrapping.
        assert_eq!(action.update(1.0, &mut node), ActionValue::Frame(3));
        assert_eq!(node.sprite.as_ref().unwrap().frame, 3);
    }

    #[test]
    fn loops_run_the_sequence_again() {
        let mut node = sprite_node();
        let mut action = AnimateAction::new(Animation::strip(0, 2, 10.0).with_loops(2));
        action.init_with_target(&mut node).unwrap();

        assert_eq!(action.update(0.0, &mut node), ActionValue::Frame(0));
        assert_eq!(action.update(0.30, &mut node), ActionValue::Frame(1));
        // Second loop starts over.
        assert_eq!(action.update(0.60, &mut node), ActionValue::Frame(0));
        assert_eq!(action.update(0.80, &mut node), ActionValue::Frame(1));
    }

    #[test]
    fn stop_restores_the_original_frame_when_asked() {
        let mut node = sprite_node();
        let mut action =
            AnimateAction::new(Animation::strip(0, 4, 10.0).restoring_original_frame());
        action.init_with_target(&mut node).unwrap();

        action.update(0.6, &mut node);
        assert_ne!(node.sprite.as_ref().unwrap().frame, 9);

        action.stop(&mut node);
        assert_eq!(node.sprite.as_ref().unwrap().frame, 9);
    }

    #[test]
    fn stop_keeps_the_current_frame_by_default() {
        let mut node = sprite_node();
        let mut action = AnimateAction::new(Animation::strip(0, 4, 10.0));
        action.init_with_target(&mut node).unwrap();

        action.update(0.6, &mut node);
        let shown = node.sprite.as_ref().unwrap().frame;
        action.stop(&mut node);
        assert_eq!(node.sprite.as_ref().unwrap().frame, shown);
    }
}
