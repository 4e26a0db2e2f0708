use std::ops;

use anyhow::Result;
use engine::{Engine, Transition};
use generational_arena::Arena;
use log::warn;

use crate::{MCTSNode, NodeId, SearchError};

pub type TreeNode<E, V> = MCTSNode<<E as Engine>::State, <E as Engine>::Action, V>;

/// Arena-backed search tree rooted at a single initialized node.
///
/// Nodes are only ever added, never removed, so every `NodeId` handed out stays valid for
/// the lifetime of the tree. Parent links are plain ids.
pub struct SearchTree<'e, E, V>
where
    E: Engine,
{
    engine: &'e E,
    arena: Arena<TreeNode<E, V>>,
    root: NodeId,
}

impl<'e, E, V> SearchTree<'e, E, V>
where
    E: Engine,
    V: Default,
{
    pub fn new(engine: &'e E, root: Transition<E::State>) -> Self {
        Self::with_arena(engine, root, Arena::new())
    }

    pub fn with_capacity(engine: &'e E, root: Transition<E::State>, capacity: usize) -> Self {
        Self::with_arena(engine, root, Arena::with_capacity(capacity))
    }

    fn with_arena(engine: &'e E, root: Transition<E::State>, mut arena: Arena<TreeNode<E, V>>) -> Self {
        let root = arena.insert(MCTSNode::root(root));

        Self {
            engine,
            arena,
            root,
        }
    }

    /// Attaches a new, uninitialized child carrying `action` to `parent`.
    pub fn add_child(&mut self, parent: NodeId, action: E::Action) -> Result<NodeId> {
        if self.get(parent)?.is_terminal() {
            return Err(SearchError::TerminalExpansion(parent).into());
        }

        let child = self.arena.insert(MCTSNode::unexpanded(parent, action));
        self.arena[parent].push_child(child);

        Ok(child)
    }
}

impl<'e, E, V> SearchTree<'e, E, V>
where
    E: Engine,
{
    pub fn engine(&self) -> &'e E {
        self.engine
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.arena.contains(node)
    }

    pub fn get(&self, node: NodeId) -> Result<&TreeNode<E, V>> {
        self.arena
            .get(node)
            .ok_or_else(|| SearchError::InvalidNode(node).into())
    }

    pub fn get_mut(&mut self, node: NodeId) -> Result<&mut TreeNode<E, V>> {
        self.arena
            .get_mut(node)
            .ok_or_else(|| SearchError::InvalidNode(node).into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode<E, V>)> {
        self.arena.iter()
    }

    /// Forks the parent's state with the node's action and records the resulting state and
    /// reward on the node. Returns `false` when the node was already initialized.
    ///
    /// Errors raised by the engine are returned unchanged and leave the node uninitialized.
    pub fn instantiate(&mut self, node: NodeId) -> Result<bool> {
        let child = self.get(node)?;
        if child.is_initialized() {
            return Ok(false);
        }

        let (parent_id, action) = match (child.parent(), child.action()) {
            (Some(parent_id), Some(action)) => (parent_id, action),
            _ => return Err(SearchError::InvalidNode(node).into()),
        };

        let parent = self.get(parent_id)?;
        let (state, parent_accumulated) = match (parent.state(), parent.accumulated_reward()) {
            (Some(state), Some(accumulated)) => (state, accumulated),
            _ => return Err(SearchError::UninitializedNode(parent_id).into()),
        };

        let transition = self.engine.fork(state, action)?;
        if !transition.reward.is_finite() {
            warn!(
                "Engine returned a non-finite reward {} for node {:?}",
                transition.reward, node
            );
        }

        self.arena[node].set_instantiated(transition, parent_accumulated);

        Ok(true)
    }

    /// Number of edges between the root and `node`.
    pub fn depth(&self, node: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.get(node)?;

        while let Some(parent) = current.parent() {
            depth += 1;
            current = self.get(parent)?;
        }

        Ok(depth)
    }

    /// The nodes from the root down to and including `node`.
    pub fn path_to(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let mut path = vec![node];
        let mut current = self.get(node)?;

        while let Some(parent) = current.parent() {
            path.push(parent);
            current = self.get(parent)?;
        }

        path.reverse();

        Ok(path)
    }

    pub fn actions_on_path(&self, path: &[NodeId]) -> Vec<&E::Action> {
        path.iter()
            .filter_map(|n| self.arena.get(*n))
            .filter_map(|n| n.action())
            .collect()
    }
}

impl<E, V> ops::Index<NodeId> for SearchTree<'_, E, V>
where
    E: Engine,
{
    type Output = TreeNode<E, V>;

    fn index(&self, node: NodeId) -> &Self::Output {
        &self.arena[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting_game::{CountingAction, CountingEngine, CountingState};
    use crate::MeanValue;

    type Tree<'e> = SearchTree<'e, CountingEngine, MeanValue>;

    fn tree(engine: &CountingEngine) -> Tree<'_> {
        SearchTree::new(engine, Transition::initial(CountingState::new(5)))
    }

    #[test]
    fn test_root_is_initialized() {
        let engine = CountingEngine::new(10, 20);
        let tree = tree(&engine);
        let root = &tree[tree.root()];

        assert!(root.is_initialized());
        assert!(root.is_root());
        assert_eq!(root.reward(), Some(0.0));
        assert_eq!(root.state().map(|s| s.count), Some(5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_child_is_uninitialized() {
        let engine = CountingEngine::new(10, 20);
        let mut tree = tree(&engine);
        let root = tree.root();
        let child = tree.add_child(root, CountingAction::Increment).unwrap();

        let node = &tree[child];
        assert!(!node.is_initialized());
        assert_eq!(node.state(), None);
        assert_eq!(node.reward(), None);
        assert_eq!(node.parent(), Some(root));
        assert_eq!(tree[root].children(), &[child]);
    }

    #[test]
    fn test_instantiate_forks_without_touching_parent() {
        let engine = CountingEngine::new(10, 20);
        let mut tree = tree(&engine);
        let root = tree.root();
        let child = tree.add_child(root, CountingAction::Increment).unwrap();

        assert!(tree.instantiate(child).unwrap());
        assert!(!tree.instantiate(child).unwrap());

        assert_eq!(tree[child].state().map(|s| s.count), Some(6));
        assert_eq!(tree[root].state().map(|s| s.count), Some(5));
        assert_eq!(tree.depth(child).unwrap(), 1);
        assert_eq!(tree.path_to(child).unwrap(), vec![root, child]);
    }

    #[test]
    fn test_terminal_nodes_do_not_gain_children() {
        let engine = CountingEngine::new(6, 20);
        let mut tree = tree(&engine);
        let root = tree.root();
        let child = tree.add_child(root, CountingAction::Increment).unwrap();
        tree.instantiate(child).unwrap();

        assert!(tree[child].is_terminal());

        let err = tree.add_child(child, CountingAction::Stay).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SearchError>(),
            Some(&SearchError::TerminalExpansion(child))
        );
        assert!(tree[child].children().is_empty());
    }

    #[test]
    fn test_accumulated_reward_sums_the_path() {
        let engine = CountingEngine::new(7, 20);
        let mut tree = tree(&engine);
        let root = tree.root();
        let a = tree.add_child(root, CountingAction::Increment).unwrap();
        tree.instantiate(a).unwrap();
        let b = tree.add_child(a, CountingAction::Increment).unwrap();
        tree.instantiate(b).unwrap();

        assert_eq!(tree[a].accumulated_reward(), Some(-0.01));
        assert_eq!(
            tree[b].accumulated_reward(),
            Some(-0.01 + CountingEngine::GOAL_REWARD)
        );
        assert_eq!(
            tree.actions_on_path(&tree.path_to(b).unwrap()),
            vec![&CountingAction::Increment, &CountingAction::Increment]
        );
    }
}
