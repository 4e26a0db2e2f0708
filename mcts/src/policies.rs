use anyhow::Result;
use engine::Engine;
use log::{debug, warn};

use crate::{Capability, LogObserver, MCTSOptions, NodeId, SearchError, SearchObserver, SearchTree};

/// Ranks `child` as a candidate for descent from `parent`. Must not mutate anything.
pub trait Score<E: Engine, V> {
    fn score(&self, tree: &SearchTree<'_, E, V>, parent: NodeId, child: NodeId) -> f32;
}

/// Decides whether `node` should gain a new child on this visit.
/// Only consulted for non-terminal nodes.
pub trait Widen<E: Engine, V> {
    fn widen(&self, tree: &SearchTree<'_, E, V>, node: NodeId) -> bool;
}

/// Produces a previously unexplored action for `node`, or `None` when nothing is left to try.
pub trait Sample<E: Engine, V> {
    fn sample(&self, tree: &SearchTree<'_, E, V>, node: NodeId) -> Result<Option<E::Action>>;

    /// Feedback once a node created from `action` has been instantiated with `reward`.
    fn update(&self, _action: &E::Action, _reward: f32) {}

    /// Number of options this sampler can ever produce, when that is independent of the state.
    fn num_options(&self) -> Option<usize> {
        None
    }

    /// The option at `idx` from `node`, when the sampler enumerates its options.
    fn option(
        &self,
        _tree: &SearchTree<'_, E, V>,
        _node: NodeId,
        _idx: usize,
    ) -> Option<E::Action> {
        None
    }
}

/// Estimates the value of `node` by simulating forward up to `depth` steps.
pub trait Rollout<E: Engine, V> {
    fn rollout(&self, tree: &SearchTree<'_, E, V>, node: NodeId, depth: usize) -> Result<f32>;
}

/// Seeds auxiliary structure on a freshly instantiated node, such as prior children.
pub trait Initialize<E: Engine, V> {
    fn initialize(&self, tree: &mut SearchTree<'_, E, V>, node: NodeId) -> Result<()>;
}

/// Reads the final path, root first, out of a searched tree.
pub trait Extract<E: Engine, V> {
    fn extract(&self, tree: &SearchTree<'_, E, V>, root: NodeId) -> Vec<NodeId>;
}

/// The pluggable strategies driving a search, each one optional.
///
/// Operations check for the strategies they need before touching the tree and fail with
/// [`SearchError::MissingCapability`] otherwise. Widening is only possible when both a
/// [`Sample`] and a [`Widen`] strategy are present.
pub struct MCTSPolicies<'p, E, V>
where
    E: Engine,
{
    options: MCTSOptions,
    pub(crate) score: Option<Box<dyn Score<E, V> + 'p>>,
    pub(crate) widen: Option<Box<dyn Widen<E, V> + 'p>>,
    pub(crate) sample: Option<Box<dyn Sample<E, V> + 'p>>,
    rollout: Option<Box<dyn Rollout<E, V> + 'p>>,
    initialize: Option<Box<dyn Initialize<E, V> + 'p>>,
    extract: Option<Box<dyn Extract<E, V> + 'p>>,
    pub(crate) observer: Box<dyn SearchObserver + 'p>,
}

impl<'p, E, V> MCTSPolicies<'p, E, V>
where
    E: Engine,
{
    pub fn builder(options: MCTSOptions) -> MCTSPoliciesBuilder<'p, E, V> {
        MCTSPoliciesBuilder::new(options)
    }

    pub fn options(&self) -> &MCTSOptions {
        &self.options
    }

    pub fn max_depth(&self) -> usize {
        self.options.max_depth
    }

    pub fn can_widen(&self) -> bool {
        self.sample.is_some() && self.widen.is_some()
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Score => self.score.is_some(),
            Capability::Widen => self.widen.is_some(),
            Capability::Sample => self.sample.is_some(),
            Capability::Rollout => self.rollout.is_some(),
            Capability::Initialize => self.initialize.is_some(),
            Capability::Extract => self.extract.is_some(),
        }
    }

    pub fn require(&self, operation: &'static str, capability: Capability) -> Result<()> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(missing(operation, capability))
        }
    }

    pub(crate) fn scorer(&self, operation: &'static str) -> Result<&(dyn Score<E, V> + 'p)> {
        self.score
            .as_deref()
            .ok_or_else(|| missing(operation, Capability::Score))
    }

    pub(crate) fn widening(
        &self,
        operation: &'static str,
    ) -> Result<(&(dyn Widen<E, V> + 'p), &(dyn Sample<E, V> + 'p))> {
        match (self.widen.as_deref(), self.sample.as_deref()) {
            (Some(widen), Some(sample)) => Ok((widen, sample)),
            (None, _) => Err(missing(operation, Capability::Widen)),
            (_, None) => Err(missing(operation, Capability::Sample)),
        }
    }

    /// Runs the initialize strategy on `node`, if one was provided.
    pub fn initialize(&self, tree: &mut SearchTree<'_, E, V>, node: NodeId) -> Result<()> {
        match &self.initialize {
            Some(initialize) => initialize.initialize(tree, node),
            None => Ok(()),
        }
    }

    /// Forks `node` from its parent if it has not been instantiated yet, then initializes it.
    pub fn instantiate(&self, tree: &mut SearchTree<'_, E, V>, node: NodeId) -> Result<()> {
        if !tree.instantiate(node)? {
            return Ok(());
        }

        let instantiated = &tree[node];
        let reward = instantiated.reward().unwrap_or_default();
        self.observer
            .on_instantiate(node, reward, instantiated.is_terminal());

        if let (Some(sample), Some(action)) = (&self.sample, instantiated.action()) {
            sample.update(action, reward);
        }

        self.initialize(tree, node)
    }

    pub fn extract(&self, tree: &SearchTree<'_, E, V>, root: NodeId) -> Result<Vec<NodeId>> {
        self.require("extract", Capability::Extract)?;

        Ok(self
            .extract
            .as_ref()
            .map(|extract| extract.extract(tree, root))
            .unwrap_or_default())
    }

    pub fn rollout(&self, tree: &SearchTree<'_, E, V>, node: NodeId, depth: usize) -> Result<f32> {
        match &self.rollout {
            Some(rollout) => rollout.rollout(tree, node, depth),
            None => Err(missing("rollout", Capability::Rollout)),
        }
    }
}

fn missing(operation: &'static str, capability: Capability) -> anyhow::Error {
    SearchError::MissingCapability {
        operation,
        capability,
    }
    .into()
}

pub struct MCTSPoliciesBuilder<'p, E, V>
where
    E: Engine,
{
    policies: MCTSPolicies<'p, E, V>,
}

impl<'p, E, V> MCTSPoliciesBuilder<'p, E, V>
where
    E: Engine,
{
    fn new(options: MCTSOptions) -> Self {
        Self {
            policies: MCTSPolicies {
                options,
                score: None,
                widen: None,
                sample: None,
                rollout: None,
                initialize: None,
                extract: None,
                observer: Box::new(LogObserver),
            },
        }
    }

    pub fn score(mut self, score: impl Score<E, V> + 'p) -> Self {
        self.policies.score = Some(Box::new(score));
        self
    }

    pub fn widen(mut self, widen: impl Widen<E, V> + 'p) -> Self {
        self.policies.widen = Some(Box::new(widen));
        self
    }

    pub fn sample(mut self, sample: impl Sample<E, V> + 'p) -> Self {
        self.policies.sample = Some(Box::new(sample));
        self
    }

    pub fn rollout(mut self, rollout: impl Rollout<E, V> + 'p) -> Self {
        self.policies.rollout = Some(Box::new(rollout));
        self
    }

    pub fn initialize(mut self, initialize: impl Initialize<E, V> + 'p) -> Self {
        self.policies.initialize = Some(Box::new(initialize));
        self
    }

    pub fn extract(mut self, extract: impl Extract<E, V> + 'p) -> Self {
        self.policies.extract = Some(Box::new(extract));
        self
    }

    pub fn observer(mut self, observer: impl SearchObserver + 'p) -> Self {
        self.policies.observer = Box::new(observer);
        self
    }

    pub fn build(self) -> MCTSPolicies<'p, E, V> {
        let policies = self.policies;

        debug!(
            "MCTS policies: score: {} widen: {} sample: {} rollout: {} initialize: {} extract: {} max_depth: {} dfs: {}",
            policies.score.is_some(),
            policies.widen.is_some(),
            policies.sample.is_some(),
            policies.rollout.is_some(),
            policies.initialize.is_some(),
            policies.extract.is_some(),
            policies.options.max_depth,
            policies.options.dfs,
        );

        if policies.widen.is_some() != policies.sample.is_some() {
            warn!("Both a widen and a sample strategy are needed to grow the tree; widening is disabled");
        }

        policies
    }
}
