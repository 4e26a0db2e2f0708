use log::trace;

use crate::NodeId;

/// Receives notifications as the search walks and grows the tree.
///
/// All methods default to doing nothing.
pub trait SearchObserver {
    fn on_visit(&self, _node: NodeId, _step: usize, _visits: usize) {}

    fn on_widen(&self, _parent: NodeId, _child: NodeId) {}

    fn on_instantiate(&self, _node: NodeId, _reward: f32, _terminal: bool) {}

    fn on_backpropagate(&self, _steps: usize, _final_reward: f32) {}
}

/// Observer that forwards every event to the `log` facade at trace level.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_visit(&self, node: NodeId, step: usize, visits: usize) {
        trace!("visit {:?} step: {} visits: {}", node, step, visits);
    }

    fn on_widen(&self, parent: NodeId, child: NodeId) {
        trace!("widen {:?} -> {:?}", parent, child);
    }

    fn on_instantiate(&self, node: NodeId, reward: f32, terminal: bool) {
        trace!(
            "instantiate {:?} reward: {:.3} terminal: {}",
            node,
            reward,
            terminal
        );
    }

    fn on_backpropagate(&self, steps: usize, final_reward: f32) {
        trace!("backpropagate steps: {} final: {:.3}", steps, final_reward);
    }
}

/// Observer that drops every event.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
