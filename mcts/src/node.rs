use engine::Transition;
use generational_arena::Index;

pub type NodeId = Index;

#[derive(Debug)]
struct Instantiated<S> {
    state: S,
    reward: f32,
    accumulated_reward: f32,
}

/// A vertex of the search tree.
///
/// A node starts out carrying only the action that leads to it. State, reward and
/// accumulated reward are attached together when the node is instantiated from its
/// parent, so an uninitialized node never exposes any of them.
#[derive(Debug)]
pub struct MCTSNode<S, A, V> {
    action: Option<A>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    instantiated: Option<Instantiated<S>>,
    visits: usize,
    terminal: bool,
    value: V,
}

impl<S, A, V> MCTSNode<S, A, V>
where
    V: Default,
{
    pub(crate) fn root(transition: Transition<S>) -> Self {
        let Transition {
            state,
            reward,
            terminal,
        } = transition;

        Self {
            action: None,
            parent: None,
            children: Vec::new(),
            instantiated: Some(Instantiated {
                state,
                reward,
                accumulated_reward: reward,
            }),
            visits: 0,
            terminal,
            value: V::default(),
        }
    }

    pub(crate) fn unexpanded(parent: NodeId, action: A) -> Self {
        Self {
            action: Some(action),
            parent: Some(parent),
            children: Vec::new(),
            instantiated: None,
            visits: 0,
            terminal: false,
            value: V::default(),
        }
    }
}

impl<S, A, V> MCTSNode<S, A, V> {
    pub(crate) fn set_instantiated(&mut self, transition: Transition<S>, parent_accumulated: f32) {
        debug_assert!(self.instantiated.is_none());

        self.terminal = transition.terminal;
        self.instantiated = Some(Instantiated {
            state: transition.state,
            reward: transition.reward,
            accumulated_reward: parent_accumulated + transition.reward,
        });
    }

    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Children in the order they were added.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_len(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn is_initialized(&self) -> bool {
        self.instantiated.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn state(&self) -> Option<&S> {
        self.instantiated.as_ref().map(|i| &i.state)
    }

    pub fn reward(&self) -> Option<f32> {
        self.instantiated.as_ref().map(|i| i.reward)
    }

    /// Sum of rewards from the root down to and including this node.
    pub fn accumulated_reward(&self) -> Option<f32> {
        self.instantiated.as_ref().map(|i| i.accumulated_reward)
    }

    pub fn visits(&self) -> usize {
        self.visits
    }

    pub(crate) fn increment_visits(&mut self) {
        self.visits += 1;
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}
