//! Single-property tween actions: alpha, rotation, scale, tint, and the
//! generic scalar property tween.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::base::{Action, ActionValue, Timing, TweenValue};
use crate::action::initializer::ActionInitializer;
use crate::action::interpolator::Interpolator;
use crate::components::color::Color;
use crate::components::node::Animatable;
use crate::core::error::{EngineError, EngineResult};

/// Fade the target's opacity.
#[derive(Debug, Clone)]
pub struct AlphaAction {
    pub timing: Timing,
    value: TweenValue<f32>,
}

impl AlphaAction {
    pub fn new(to: f32, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to),
        }
    }

    pub fn with_from(mut self, from: f32) -> Self {
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
            ActionInitializer::Alpha { timing, from, to } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected an alpha initializer",
            )),
        }
    }
}

impl Action for AlphaAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.alpha(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        target.set_alpha(v);
        ActionValue::Scalar(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Alpha {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
        }
    }
}

/// Turn the target, in degrees.
#[derive(Debug, Clone)]
pub struct RotateAction {
    pub timing: Timing,
    value: TweenValue<f32>,
}

impl RotateAction {
    pub fn new(to_degrees: f32, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to_degrees),
        }
    }

    pub fn with_from(mut self, from_degrees: f32) -> Self {
        self.value = self.value.with_from(from_degrees);
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
            ActionInitializer::Rotate { timing, from, to } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a rotate initializer",
            )),
        }
    }
}

impl Action for RotateAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.rotation(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        target.set_rotation(v);
        ActionValue::Scalar(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Rotate {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
        }
    }
}

/// Resize the target per axis.
#[derive(Debug, Clone)]
pub struct ScaleAction {
    pub timing: Timing,
    value: TweenValue<Vec2>,
}

impl ScaleAction {
    pub fn new(to: Vec2, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to),
        }
    }

    /// Uniform scale on both axes.
    pub fn uniform(to: f32, duration: f32) -> Self {
        Self::new(Vec2::splat(to), duration)
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
            ActionInitializer::Scale { timing, from, to } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a scale initializer",
            )),
        }
    }
}

impl Action for ScaleAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.scale(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        target.set_scale(v);
        ActionValue::Point(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Scale {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
        }
    }
}

/// Blend the target's tint color channel-wise.
#[derive(Debug, Clone)]
pub struct TintAction {
    pub timing: Timing,
    value: TweenValue<Color>,
}

impl TintAction {
    pub fn new(to: Color, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            value: TweenValue::new(to),
        }
    }

    pub fn with_from(mut self, from: Color) -> Self {
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
            ActionInitializer::Tint { timing, from, to } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a tint initializer",
            )),
        }
    }
}

impl Action for TintAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value.capture(target.color(), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        target.set_color(v);
        ActionValue::Color(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Tint {
            timing: (&self.timing).into(),
            from: self.value.from,
            to: self.value.to,
        }
    }
}

/// Scalar property selector for [`PropertyAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeProperty {
    PositionX,
    PositionY,
    Rotation,
    ScaleX,
    ScaleY,
    Alpha,
}

impl NodeProperty {
    pub fn get(self, target: &dyn Animatable) -> f32 {
        match self {
            NodeProperty::PositionX => target.position().x,
            NodeProperty::PositionY => target.position().y,
            NodeProperty::Rotation => target.rotation(),
            NodeProperty::ScaleX => target.scale().x,
            NodeProperty::ScaleY => target.scale().y,
            NodeProperty::Alpha => target.alpha(),
        }
    }

    pub fn set(self, target: &mut dyn Animatable, v: f32) {
        match self {
            NodeProperty::PositionX => {
                let mut p = target.position();
                p.x = v;
                target.set_position(p);
            }
            NodeProperty::PositionY => {
                let mut p = target.position();
                p.y = v;
                target.set_position(p);
            }
            NodeProperty::Rotation => target.set_rotation(v),
            NodeProperty::ScaleX => {
                let mut s = target.scale();
                s.x = v;
                target.set_scale(s);
            }
            NodeProperty::ScaleY => {
                let mut s = target.scale();
                s.y = v;
                target.set_scale(s);
            }
            NodeProperty::Alpha => target.set_alpha(v),
        }
    }
}

/// Tween any single scalar property, selected by [`NodeProperty`].
#[derive(Debug, Clone)]
pub struct PropertyAction {
    pub timing: Timing,
    pub property: NodeProperty,
    value: TweenValue<f32>,
}

impl PropertyAction {
    pub fn new(property: NodeProperty, to: f32, duration: f32) -> Self {
        Self {
            timing: Timing::new(duration),
            property,
            value: TweenValue::new(to),
        }
    }

    pub fn with_from(mut self, from: f32) -> Self {
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
            ActionInitializer::Property {
                timing,
                property,
                from,
                to,
            } => {
                let mut value = TweenValue::new(*to);
                value.from = *from;
                Ok(Self {
                    timing: timing.build(),
                    property: *property,
                    value,
                })
            }
            _ => Err(EngineError::invalid_initializer(
                "expected a property initializer",
            )),
        }
    }
}

impl Action for PropertyAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.value
            .capture(self.property.get(target), self.timing.relative);
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        let v = self
            .value
            .value_at(t, self.timing.relative, self.timing.reversed);
        self.property.set(target, v);
        ActionValue::Scalar(v)
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Property {
            timing: (&self.timing).into(),
            property: self.property,
            from: self.value.from,
            to: self.value.to,
        }
    }
}
