use engine::Engine;

use crate::{Extract, NodeId, PropagatedValue, SearchTree, TreeNode};

/// Follows the most visited instantiated child from the root. The first child wins ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MostVisitedExtract;

impl<E, V> Extract<E, V> for MostVisitedExtract
where
    E: Engine,
{
    fn extract(&self, tree: &SearchTree<'_, E, V>, root: NodeId) -> Vec<NodeId> {
        principal_path(tree, root, |node| node.visits() as f32)
    }
}

/// Follows the instantiated child with the highest propagated value from the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestValueExtract;

impl<E, V> Extract<E, V> for BestValueExtract
where
    E: Engine,
    V: PropagatedValue,
{
    fn extract(&self, tree: &SearchTree<'_, E, V>, root: NodeId) -> Vec<NodeId> {
        principal_path(tree, root, |node| {
            if node.visits() == 0 {
                f32::NEG_INFINITY
            } else {
                node.value().value()
            }
        })
    }
}

fn principal_path<E, V, F>(tree: &SearchTree<'_, E, V>, root: NodeId, key: F) -> Vec<NodeId>
where
    E: Engine,
    F: Fn(&TreeNode<E, V>) -> f32,
{
    if !tree.contains(root) {
        return Vec::new();
    }

    let mut path = vec![root];
    let mut node = root;

    loop {
        let mut best: Option<(NodeId, f32)> = None;

        for &child in tree[node].children() {
            let child_node = &tree[child];
            if !child_node.is_initialized() {
                continue;
            }

            let value = key(child_node);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((child, value));
            }
        }

        match best {
            Some((child, _)) => {
                path.push(child);
                node = child;
            }
            None => return path,
        }
    }
}
