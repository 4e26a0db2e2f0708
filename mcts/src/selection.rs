use anyhow::Result;
use engine::Engine;

use crate::{MCTSPolicies, NodeId, NodeValue, Score, SearchError, SearchTree};

/// Summary of a single call to [`MCTSPolicies::select`].
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Number of nodes walked, including the starting node.
    pub steps: usize,
    /// Reward of the deepest node reached.
    pub final_reward: f32,
    /// The deepest node reached.
    pub leaf: NodeId,
    /// The child added by this call, if any.
    pub widened: Option<NodeId>,
}

impl<'p, E, V> MCTSPolicies<'p, E, V>
where
    E: Engine,
    V: NodeValue + Default,
{
    /// Walks down from `node` for at most `max_depth` nodes, growing the tree by at most one
    /// child, then backpropagates the collected rewards along the walked path.
    ///
    /// Once a child has been added, deeper nodes are still descended but are not widened
    /// again, unless `dfs` is enabled and the node has no children at all. On ties in score
    /// the earliest child wins.
    pub fn select(
        &self,
        tree: &mut SearchTree<'_, E, V>,
        node: NodeId,
        max_depth: usize,
        can_widen: bool,
    ) -> Result<Selection> {
        let score = self.scorer("select")?;
        let widening = self.widen.as_deref().zip(self.sample.as_deref());
        let dfs = self.options().dfs;

        let mut node = node;
        let mut can_widen = can_widen;
        let mut widened = None;
        let mut visited: Vec<(NodeId, f32)> = Vec::with_capacity(max_depth.min(64));
        let mut steps = 0;

        while steps < max_depth {
            let current = tree.get_mut(node)?;
            let reward = current
                .reward()
                .ok_or(SearchError::UninitializedNode(node))?;

            steps += 1;
            current.increment_visits();
            visited.push((node, reward));
            self.observer.on_visit(node, steps, current.visits());

            if current.is_terminal() {
                break;
            }

            let is_leaf = !current.has_children();
            if let Some((widen, sample)) = widening {
                if (can_widen || (is_leaf && dfs)) && widen.widen(tree, node) {
                    if let Some(action) = sample.sample(tree, node)? {
                        let child = tree.add_child(node, action)?;
                        self.observer.on_widen(node, child);
                        widened = Some(child);
                        can_widen = false;
                    }
                }
            }

            let Some(child) = best_child(score, tree, node) else {
                break;
            };

            self.instantiate(tree, child)?;
            node = child;
        }

        let (leaf, final_reward) = visited.last().copied().unwrap_or((node, 0.0));

        let mut acc_reward = 0.0;
        for (visited_node, reward) in visited.iter().rev() {
            acc_reward += reward;
            tree.get_mut(*visited_node)?
                .value_mut()
                .update(acc_reward, final_reward, steps);
        }

        self.observer.on_backpropagate(steps, final_reward);

        Ok(Selection {
            steps,
            final_reward,
            leaf,
            widened,
        })
    }

    /// Runs a full selection from `root` using the configured depth with widening enabled.
    pub fn explore(&self, tree: &mut SearchTree<'_, E, V>, root: NodeId) -> Result<Selection> {
        self.select(tree, root, self.max_depth(), true)
    }
}

impl<'p, E, V> MCTSPolicies<'p, E, V>
where
    E: Engine,
{
    /// Descends through the best scored children to the next node that should be expanded.
    ///
    /// Returns `None` when the depth is exhausted or a terminal node is reached, and the
    /// node itself when it still wants to widen or has no children yet. Only supported for
    /// trees that can widen.
    pub fn get_next(
        &self,
        tree: &SearchTree<'_, E, V>,
        node: NodeId,
        max_depth: usize,
    ) -> Result<Option<NodeId>> {
        let (widen, _) = self.widening("get_next")?;
        let score = self.scorer("get_next")?;

        let mut node = node;
        let mut depth = max_depth;

        loop {
            if depth == 0 || tree.get(node)?.is_terminal() {
                return Ok(None);
            }

            if widen.widen(tree, node) {
                return Ok(Some(node));
            }

            match best_child(score, tree, node) {
                Some(child) => node = child,
                None => return Ok(Some(node)),
            }

            depth -= 1;
        }
    }
}

/// The highest scoring child of `node`. The first child wins ties.
fn best_child<E, V>(
    score: &dyn Score<E, V>,
    tree: &SearchTree<'_, E, V>,
    node: NodeId,
) -> Option<NodeId>
where
    E: Engine,
{
    let mut best: Option<(NodeId, f32)> = None;

    for &child in tree[node].children() {
        let child_score = score.score(tree, node, child);
        if best.map_or(true, |(_, best_score)| child_score > best_score) {
            best = Some((child, child_score));
        }
    }

    best.map(|(child, _)| child)
}
