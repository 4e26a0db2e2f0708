use engine::Engine;

use crate::{NodeId, SearchTree, Widen};

/// Allows a node `k * visits^alpha` children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressiveWidening {
    pub k: f32,
    pub alpha: f32,
}

impl ProgressiveWidening {
    pub fn new(k: f32, alpha: f32) -> Self {
        Self { k, alpha }
    }

    pub fn max_children(&self, visits: usize) -> f32 {
        self.k * (visits.max(1) as f32).powf(self.alpha)
    }
}

impl Default for ProgressiveWidening {
    fn default() -> Self {
        Self { k: 1.0, alpha: 0.5 }
    }
}

impl<E, V> Widen<E, V> for ProgressiveWidening
where
    E: Engine,
{
    fn widen(&self, tree: &SearchTree<'_, E, V>, node: NodeId) -> bool {
        let node = &tree[node];

        (node.child_len() as f32) < self.max_children(node.visits())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysWiden;

impl<E, V> Widen<E, V> for AlwaysWiden
where
    E: Engine,
{
    fn widen(&self, _: &SearchTree<'_, E, V>, _: NodeId) -> bool {
        true
    }
}
