use engine::Engine;

use crate::{NodeId, PropagatedValue, Score, SearchTree};

/// Upper confidence bound applied to trees.
///
/// Unvisited children score infinitely high so each is tried once before any is revisited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UctScore {
    pub exploration: f32,
}

impl UctScore {
    pub fn new(exploration: f32) -> Self {
        Self { exploration }
    }
}

impl Default for UctScore {
    fn default() -> Self {
        Self {
            exploration: std::f32::consts::SQRT_2,
        }
    }
}

impl<E, V> Score<E, V> for UctScore
where
    E: Engine,
    V: PropagatedValue,
{
    fn score(&self, tree: &SearchTree<'_, E, V>, parent: NodeId, child: NodeId) -> f32 {
        let child = &tree[child];
        let nsa = child.visits();
        if nsa == 0 {
            return f32::INFINITY;
        }

        let ns = tree[parent].visits().max(1) as f32;
        let qsa = child.value().value();
        let usa = self.exploration * (ns.ln() / nsa as f32).sqrt();

        qsa + usa
    }
}
