//! Reconstructible action descriptions.
//!
//! Every concrete action can emit an [`ActionInitializer`] and be rebuilt
//! from one; [`build_action`] dispatches on the type tag. JSON is the
//! reference wire format. `from` fields stay `Option` so a round trip
//! preserves the difference between "start at zero / current value" and an
//! explicitly set start.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::animate::AnimateAction;
use crate::action::base::{Action, Timing};
use crate::action::basic::{
    AlphaAction, NodeProperty, PropertyAction, RotateAction, ScaleAction, TintAction,
};
use crate::action::interpolator::Interpolator;
use crate::action::motion::{JumpAction, MoveAction, PathAction};
use crate::action::sequence::SequenceAction;
use crate::components::animation::Animation;
use crate::components::color::Color;
use crate::core::error::EngineResult;
use crate::path::Path;

/// Serialized form of [`Timing`]. Playback state (elapsed time, lifecycle)
/// is deliberately absent — initializers describe reconstructible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingInit {
    pub duration: f32,
    #[serde(default)]
    pub delay: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub relative: bool,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub interpolator: Interpolator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

fn default_speed() -> f32 {
    1.0
}

fn default_repeat() -> u32 {
    1
}

impl From<&Timing> for TimingInit {
    fn from(timing: &Timing) -> Self {
        Self {
            duration: timing.duration,
            delay: timing.delay,
            speed: timing.speed,
            repeat: timing.repeat,
            relative: timing.relative,
            reversed: timing.reversed,
            interpolator: timing.interpolator,
            tag: timing.tag.clone(),
        }
    }
}

impl TimingInit {
    /// Build a fresh (not yet initialized) timing from this description.
    pub fn build(&self) -> Timing {
        let mut timing = Timing::new(self.duration);
        timing.delay = self.delay;
        timing.speed = self.speed;
        timing.repeat = self.repeat;
        timing.relative = self.relative;
        timing.reversed = self.reversed;
        timing.interpolator = self.interpolator;
        timing.tag = self.tag.clone();
        timing
    }
}

/// Tagged description of one action, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionInitializer {
    Alpha {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<f32>,
        to: f32,
    },
    Rotate {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<f32>,
        to: f32,
    },
    Scale {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<Vec2>,
        to: Vec2,
    },
    Tint {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<Color>,
        to: Color,
    },
    Move {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<Vec2>,
        to: Vec2,
    },
    Jump {
        #[serde(flatten)]
        timing: TimingInit,
        #[serde(default)]
        from: Option<Vec2>,
        to: Vec2,
        height: f32,
        jumps: u32,
    },
    Property {
        #[serde(flatten)]
        timing: TimingInit,
        property: NodeProperty,
        #[serde(default)]
        from: Option<f32>,
        to: f32,
    },
    Animate {
        #[serde(flatten)]
        timing: TimingInit,
        animation: Animation,
    },
    PathFollow {
        #[serde(flatten)]
        timing: TimingInit,
        path: Path,
    },
    Sequence {
        #[serde(flatten)]
        timing: TimingInit,
        actions: Vec<ActionInitializer>,
    },
}

impl ActionInitializer {
    /// Parse an initializer from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Rebuild a boxed action from its initializer.
pub fn build_action(init: &ActionInitializer) -> EngineResult<Box<dyn Action>> {
    Ok(match init {
        ActionInitializer::Alpha { .. } => Box::new(AlphaAction::from_initializer(init)?),
        ActionInitializer::Rotate { .. } => Box::new(RotateAction::from_initializer(init)?),
        ActionInitializer::Scale { .. } => Box::new(ScaleAction::from_initializer(init)?),
        ActionInitializer::Tint { .. } => Box::new(TintAction::from_initializer(init)?),
        ActionInitializer::Move { .. } => Box::new(MoveAction::from_initializer(init)?),
        ActionInitializer::Jump { .. } => Box::new(JumpAction::from_initializer(init)?),
        ActionInitializer::Property { .. } => Box::new(PropertyAction::from_initializer(init)?),
        ActionInitializer::Animate { .. } => Box::new(AnimateAction::from_initializer(init)?),
        ActionInitializer::PathFollow { .. } => Box::new(PathAction::from_initializer(init)?),
        ActionInitializer::Sequence { .. } => Box::new(SequenceAction::from_initializer(init)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::base::ActionValue;
    use crate::components::node::{Node, NodeId};
    use crate::components::sprite::SpriteState;

    /// Drive an action over a fixed step sequence and record applied values.
    fn run(action: &mut dyn Action, node: &mut Node, steps: usize, dt: f32) -> Vec<ActionValue> {
        action.init_with_target(node).unwrap();
        (0..steps).map(|_| action.step(dt, node)).collect()
    }

    fn fresh_node() -> Node {
        Node::new(NodeId(1))
            .with_alpha(1.0)
            .with_sprite(SpriteState::default())
    }

    /// Round-trip law: a rebuilt action applies the same value sequence as
    /// the action it was reconstructed from.
    fn assert_round_trip(mut original: Box<dyn Action>) {
        let init = original.initializer();
        let json = init.to_json().unwrap();
        let parsed = ActionInitializer::from_json(&json).unwrap();
        let mut rebuilt = build_action(&parsed).unwrap();

        let mut node_a = fresh_node();
        let mut node_b = fresh_node();
        let seq_a = run(original.as_mut(), &mut node_a, 12, 0.1);
        let seq_b = run(rebuilt.as_mut(), &mut node_b, 12, 0.1);
        assert_eq!(seq_a, seq_b);
        assert_eq!(node_a, node_b);
    }

    #[test]
    fn alpha_round_trip() {
        assert_round_trip(Box::new(AlphaAction::new(0.5, 1.0)));
    }

    #[test]
    fn alpha_round_trip_preserves_explicit_from() {
        assert_round_trip(Box::new(AlphaAction::new(0.5, 1.0).with_from(0.2)));

        // The distinction between "no from" and "from zero" must survive.
        let with_from = AlphaAction::new(0.5, 1.0).with_from(0.0).initializer();
        let without = AlphaAction::new(0.5, 1.0).initializer();
        match (with_from, without) {
            (
                ActionInitializer::Alpha { from: Some(f), .. },
                ActionInitializer::Alpha { from: None, .. },
            ) => assert_eq!(f, 0.0),
            other => panic!("unexpected initializers: {other:?}"),
        }
    }

    #[test]
    fn rotate_round_trip_with_relative_reversed() {
        let mut action = RotateAction::new(360.0, 1.0).with_from(0.0);
        action.timing.relative = true;
        action.timing.reversed = true;
        assert_round_trip(Box::new(action));
    }

    #[test]
    fn scale_and_tint_round_trip() {
        assert_round_trip(Box::new(ScaleAction::new(Vec2::new(2.0, 3.0), 0.8)));
        assert_round_trip(Box::new(TintAction::new(Color::RED, 0.8)));
    }

    #[test]
    fn move_and_jump_round_trip() {
        assert_round_trip(Box::new(MoveAction::new(Vec2::new(10.0, 5.0), 1.0)));
        let mut jump = JumpAction::new(Vec2::new(40.0, 0.0), 12.0, 3, 1.0);
        jump.timing.relative = true;
        assert_round_trip(Box::new(jump));
    }

    #[test]
    fn property_round_trip() {
        assert_round_trip(Box::new(PropertyAction::new(
            NodeProperty::PositionX,
            25.0,
            1.0,
        )));
    }

    #[test]
    fn animate_round_trip() {
        let anim = Animation::strip(0, 6, 10.0).with_loops(2);
        assert_round_trip(Box::new(AnimateAction::new(anim)));
    }

    #[test]
    fn path_follow_round_trip() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .quadratic_to(Vec2::new(15.0, 10.0), Vec2::new(20.0, 0.0));
        assert_round_trip(Box::new(PathAction::new(path, 1.0)));
    }

    #[test]
    fn sequence_round_trip() {
        let seq = SequenceAction::new(vec![
            Box::new(AlphaAction::new(0.0, 0.4)),
            Box::new(MoveAction::new(Vec2::new(5.0, 5.0), 0.4)),
        ]);
        assert_round_trip(Box::new(seq));
    }

    #[test]
    fn mismatched_initializer_is_rejected() {
        let init = AlphaAction::new(0.5, 1.0).initializer();
        let err = RotateAction::from_initializer(&init).unwrap_err();
        assert!(err.to_string().contains("invalid initializer"));
    }

    #[test]
    fn timing_fields_survive_json() {
        let mut action = AlphaAction::new(0.5, 2.0);
        action.timing.delay = 0.25;
        action.timing.speed = 2.0;
        action.timing.repeat = 3;
        action.timing.tag = Some("fade".into());

        let json = action.initializer().to_json().unwrap();
        let parsed = ActionInitializer::from_json(&json).unwrap();
        match parsed {
            ActionInitializer::Alpha { timing, .. } => {
                assert_eq!(timing.duration, 2.0);
                assert_eq!(timing.delay, 0.25);
                assert_eq!(timing.speed, 2.0);
                assert_eq!(timing.repeat, 3);
                assert_eq!(timing.tag.as_deref(), Some("fade"));
            }
            other => panic!("unexpected initializer: {other:?}"),
        }
    }
}
