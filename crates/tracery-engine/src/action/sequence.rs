//! Back-to-back composition of actions as one action.

use crate::action::base::{Action, ActionValue, Timing};
use crate::action::initializer::{build_action, ActionInitializer};
use crate::components::node::Animatable;
use crate::core::error::EngineResult;

/// Play child actions one after another.
///
/// The sequence's duration is the sum of the children's total durations
/// (delay, repeats and speed included). Children initialize lazily as they
/// become active, so each one captures the target state its predecessor left
/// behind — relative children compose. Crossing a child boundary first drives
/// the outgoing child to its end state.
///
/// Reversing a whole sequence is not supported; reverse the children instead.
pub struct SequenceAction {
    pub timing: Timing,
    children: Vec<Box<dyn Action>>,
    current: usize,
    consumed: f32,
}

impl SequenceAction {
    pub fn new(children: Vec<Box<dyn Action>>) -> Self {
        let duration = children.iter().map(|c| c.timing().total_duration()).sum();
        Self {
            timing: Timing::new(duration),
            children,
            current: 0,
            consumed: 0.0,
        }
    }

    pub fn from_initializer(init: &ActionInitializer) -> EngineResult<Self> {
        match init {
            ActionInitializer::Sequence { timing, actions } => {
                let children = actions
                    .iter()
                    .map(build_action)
                    .collect::<EngineResult<Vec<_>>>()?;
                let mut seq = Self::new(children);
                seq.timing = timing.build();
                Ok(seq)
            }
            _ => Err(crate::core::error::EngineError::invalid_initializer(
                "expected a sequence initializer",
            )),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Action for SequenceAction {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn on_init(&mut self, target: &mut dyn Animatable) -> EngineResult<()> {
        self.current = 0;
        self.consumed = 0.0;
        if let Some(first) = self.children.first_mut() {
            first.init_with_target(target)?;
        }
        Ok(())
    }

    fn update(&mut self, t: f32, target: &mut dyn Animatable) -> ActionValue {
        if self.children.is_empty() {
            return ActionValue::None;
        }

        // Convert the sequence's normalized time into local seconds and feed
        // each child the slice of time that belongs to it.
        let u = (t.clamp(0.0, 1.0) * self.timing.duration).min(self.timing.duration);
        let mut remaining = (u - self.consumed).max(0.0);
        self.consumed = self.consumed.max(u);

        let mut value = ActionValue::None;
        loop {
            let Some(child) = self.children.get_mut(self.current) else {
                break;
            };
            let left = (child.timing().total_duration() - child.timing().consumed_seconds())
                .max(0.0);
            let feed = remaining.min(left);
            let v = child.step(feed, target);
            if !matches!(v, ActionValue::None) {
                value = v;
            }
            remaining -= feed;

            if child.is_done() {
                self.current += 1;
                if let Some(next) = self.children.get_mut(self.current) {
                    if let Err(err) = next.init_with_target(target) {
                        log::warn!("sequence child failed to initialize: {err}");
                    }
                }
                continue;
            }
            break;
        }
        value
    }

    fn on_stop(&mut self, target: &mut dyn Animatable) {
        if let Some(child) = self.children.get_mut(self.current) {
            child.stop(target);
        }
    }

    fn initializer(&self) -> ActionInitializer {
        ActionInitializer::Sequence {
            timing: (&self.timing).into(),
            actions: self.children.iter().map(|c| c.initializer()).collect(),
        }
    }
}
