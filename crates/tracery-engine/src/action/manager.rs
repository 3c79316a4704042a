//! Per-frame action scheduling.
//!
//! # Usage
//!
//! ```ignore
//! let mut manager = ActionManager::new();
//! manager.schedule(&mut scene, id, Box::new(MoveAction::new(dest, 0.5)))?;
//! manager.step(dt, &mut scene);  // once per frame
//! ```

use crate::action::base::Action;
use crate::components::node::NodeId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::scene::Scene;

/// One scheduled action bound to one target node.
pub struct ActionInfo {
    pub node: NodeId,
    pub action: Box<dyn Action>,
    /// Cancellation tag: the action's own, or one allocated by the manager.
    pub tag: String,
}

/// Owns and steps all active (target, action) pairs.
///
/// Stepping iterates a fixed-length snapshot of the active list captured at
/// the top of the call, so actions scheduled from within the step are not
/// advanced until the next frame. Finished entries are removed afterwards in
/// one linear filter, never mid-scan.
pub struct ActionManager {
    infos: Vec<ActionInfo>,
    /// Monotonic counter for auto-generated tags, private to this manager.
    next_tag: u64,
}

impl ActionManager {
    pub fn new() -> Self {
        Self {
            infos: Vec::new(),
            next_tag: 0,
        }
    }

    fn alloc_tag(&mut self) -> String {
        let tag = format!("action-{}", self.next_tag);
        self.next_tag += 1;
        tag
    }

    /// Bind an action to a node and initialize it immediately.
    ///
    /// Fails fast when the node is absent or lacks a capability the action
    /// needs; nothing is scheduled in that case.
    pub fn schedule(
        &mut self,
        scene: &mut Scene,
        node: NodeId,
        mut action: Box<dyn Action>,
    ) -> EngineResult<()> {
        let target = scene.get_mut(node).ok_or_else(|| {
            EngineError::missing_target(format!("node {:?} is not in the scene", node))
        })?;
        action.init_with_target(target)?;

        let tag = match &action.timing().tag {
            Some(tag) => tag.clone(),
            None => self.alloc_tag(),
        };
        self.infos.push(ActionInfo { node, action, tag });
        Ok(())
    }

    /// Start a fluent chain of actions on one node. Each pushed action is
    /// delayed by the cumulative duration of its predecessors, so the chain
    /// plays back-to-back without a sequence wrapper.
    pub fn chain<'a>(&'a mut self, scene: &'a mut Scene, node: NodeId) -> ActionChain<'a> {
        ActionChain {
            manager: self,
            scene,
            node,
            offset: 0.0,
        }
    }

    /// Stop the actions with the given tag on one node. Unknown tags are a
    /// no-op, not an error. Stopped entries leave the list at the next step.
    pub fn stop_by_tag(&mut self, scene: &mut Scene, node: NodeId, tag: &str) {
        let mut hit = false;
        for info in &mut self.infos {
            if info.node == node && info.tag == tag {
                hit = true;
                if let Some(target) = scene.get_mut(info.node) {
                    info.action.stop(target);
                }
            }
        }
        if !hit {
            log::debug!("stop_by_tag: no action tagged {tag:?} on {node:?}");
        }
    }

    /// Stop every action bound to one node.
    pub fn stop_for_node(&mut self, scene: &mut Scene, node: NodeId) {
        for info in &mut self.infos {
            if info.node == node {
                if let Some(target) = scene.get_mut(info.node) {
                    info.action.stop(target);
                }
            }
        }
    }

    /// Advance all active actions by `dt` seconds.
    pub fn step(&mut self, dt: f32, scene: &mut Scene) {
        // Fixed-length snapshot: callbacks may schedule more actions during
        // this pass; they start next frame.
        let count = self.infos.len();
        let mut any_done = false;

        for info in &mut self.infos[..count] {
            if info.action.is_done() {
                any_done = true;
                continue;
            }
            match scene.get_mut(info.node) {
                Some(target) => {
                    info.action.step(dt, target);
                }
                None => log::debug!("step: node {:?} left the scene", info.node),
            }
            if info.action.is_done() {
                any_done = true;
            }
        }

        if any_done {
            self.infos.retain(|info| !info.action.is_done());
        }
    }

    pub fn pause_all(&mut self) {
        for info in &mut self.infos {
            info.action.pause();
        }
    }

    pub fn resume_all(&mut self) {
        for info in &mut self.infos {
            info.action.resume();
        }
    }

    /// Number of actions still scheduled (stopped entries awaiting the next
    /// filter pass are not counted).
    pub fn num_actions(&self) -> usize {
        self.infos.iter().filter(|i| !i.action.is_done()).count()
    }

    /// Number of actions scheduled for one node. Absent nodes count zero.
    pub fn num_actions_for_node(&self, node: NodeId) -> usize {
        self.infos
            .iter()
            .filter(|i| i.node == node && !i.action.is_done())
            .count()
    }
}

impl Default for ActionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder handle returned by [`ActionManager::chain`].
pub struct ActionChain<'a> {
    manager: &'a mut ActionManager,
    scene: &'a mut Scene,
    node: NodeId,
    /// Wall-clock offset accumulated from prior actions in the chain.
    offset: f32,
}

impl ActionChain<'_> {
    /// Append an action to the chain. Its delay is pushed out so it starts
    /// when the previous chained action finishes.
    pub fn then(self, mut action: Box<dyn Action>) -> EngineResult<Self> {
        let Self {
            manager,
            scene,
            node,
            offset,
        } = self;

        let span = action.timing().total_duration();
        // Delay is tracked in the action's own (speed-scaled) clock.
        let timing = action.timing_mut();
        timing.delay += offset * timing.speed;
        manager.schedule(scene, node, action)?;

        Ok(Self {
            manager,
            scene,
            node,
            offset: offset + span,
        })
    }
}
