use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use engine::Engine;
use log::{debug, info};

use crate::{Capability, MCTSPolicies, NodeId, NodeValue, SearchTree};

/// The result of running a search driver.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub elapsed: Duration,
    /// Root-to-leaf path. Empty when no path could be found.
    pub path: Vec<NodeId>,
}

impl SearchOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn leaf(&self) -> Option<NodeId> {
        self.path.last().copied()
    }
}

/// A complete search over a tree, starting at its root.
pub trait Search<E, V>
where
    E: Engine,
{
    fn search(
        &self,
        tree: &mut SearchTree<'_, E, V>,
        policies: &MCTSPolicies<'_, E, V>,
    ) -> Result<SearchOutcome>;
}

/// Exhaustive search over the children already attached to each node.
///
/// Children are never sampled here; they must be attached by the initialize strategy.
/// The terminal node with the greatest accumulated reward wins, the first one found on ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthFirstSearch {
    pub max_expansions: usize,
}

impl DepthFirstSearch {
    pub fn new(max_expansions: usize) -> Self {
        Self { max_expansions }
    }
}

impl Default for DepthFirstSearch {
    fn default() -> Self {
        Self::new(10)
    }
}

impl<E, V> Search<E, V> for DepthFirstSearch
where
    E: Engine,
{
    fn search(
        &self,
        tree: &mut SearchTree<'_, E, V>,
        policies: &MCTSPolicies<'_, E, V>,
    ) -> Result<SearchOutcome> {
        let start = Instant::now();
        let root = tree.root();

        policies.initialize(tree, root)?;

        let mut frontier = vec![root];
        let mut best: Option<(NodeId, f32)> = None;
        let mut expanded = 0;

        while let Some(node) = frontier.pop() {
            let current = tree.get(node)?;

            if current.is_terminal() {
                let reward = current.accumulated_reward().unwrap_or(f32::NEG_INFINITY);
                if best.map_or(true, |(_, best_reward)| reward > best_reward) {
                    best = Some((node, reward));
                }

                continue;
            }

            let children: Vec<NodeId> = current
                .children()
                .iter()
                .take(self.max_expansions)
                .copied()
                .collect();

            for child in children {
                policies.instantiate(tree, child)?;
                frontier.push(child);
                expanded += 1;
            }
        }

        let path = match best {
            Some((node, reward)) => {
                debug!("DFS best terminal {:?} reward: {:.3}", node, reward);
                tree.path_to(node)?
            }
            None => Vec::new(),
        };

        let elapsed = start.elapsed();
        info!(
            "DFS expanded {} nodes in {:.3}s, path length: {}",
            expanded,
            elapsed.as_secs_f64(),
            path.len()
        );

        Ok(SearchOutcome { elapsed, path })
    }
}

/// Repeated selection from the root followed by path extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonteCarloTreeSearch {
    pub iterations: usize,
}

impl MonteCarloTreeSearch {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl Default for MonteCarloTreeSearch {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<E, V> Search<E, V> for MonteCarloTreeSearch
where
    E: Engine,
    V: NodeValue + Default,
{
    fn search(
        &self,
        tree: &mut SearchTree<'_, E, V>,
        policies: &MCTSPolicies<'_, E, V>,
    ) -> Result<SearchOutcome> {
        policies.require("MonteCarloTreeSearch", Capability::Score)?;
        policies.require("MonteCarloTreeSearch", Capability::Extract)?;

        let start = Instant::now();
        let root = tree.root();

        policies.initialize(tree, root)?;

        let mut max_steps = 0;
        for _ in 0..self.iterations {
            let selection = policies.explore(tree, root)?;
            max_steps = max_steps.max(selection.steps);
        }

        let path = policies.extract(tree, root)?;

        let elapsed = start.elapsed();
        info!(
            "MCTS ran {} iterations in {:.3}s, nodes: {}, max depth: {}, path length: {}",
            self.iterations,
            elapsed.as_secs_f64(),
            tree.len(),
            max_steps,
            path.len()
        );

        Ok(SearchOutcome { elapsed, path })
    }
}

/// A search driver chosen at runtime, e.g. from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchAlgorithm {
    DepthFirst(DepthFirstSearch),
    MonteCarlo(MonteCarloTreeSearch),
}

impl SearchAlgorithm {
    pub const NAMES: [&'static str; 2] = ["dfs", "mcts"];

    /// Resolves `name` to a driver. `limit` is the number of expansions per node for
    /// depth first search and the number of iterations for monte carlo tree search.
    pub fn from_name(name: &str, limit: usize) -> Result<Self> {
        Self::from_options(name, limit, limit)
    }

    /// Resolves `name` to a driver, taking the limit that applies to the chosen algorithm.
    pub fn from_options(name: &str, max_expansions: usize, iterations: usize) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth_first" => Ok(Self::DepthFirst(DepthFirstSearch::new(max_expansions))),
            "mcts" | "monte_carlo" => Ok(Self::MonteCarlo(MonteCarloTreeSearch::new(iterations))),
            other => Err(anyhow!(
                "Unknown search algorithm '{}', expected one of {:?}",
                other,
                Self::NAMES
            )),
        }
    }
}

impl Display for SearchAlgorithm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::DepthFirst(dfs) => write!(f, "dfs (max_expansions: {})", dfs.max_expansions),
            Self::MonteCarlo(mcts) => write!(f, "mcts (iterations: {})", mcts.iterations),
        }
    }
}

impl<E, V> Search<E, V> for SearchAlgorithm
where
    E: Engine,
    V: NodeValue + Default,
{
    fn search(
        &self,
        tree: &mut SearchTree<'_, E, V>,
        policies: &MCTSPolicies<'_, E, V>,
    ) -> Result<SearchOutcome> {
        match self {
            Self::DepthFirst(dfs) => dfs.search(tree, policies),
            Self::MonteCarlo(mcts) => mcts.search(tree, policies),
        }
    }
}
