use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use engine::Transition;
use log::info;
use mcts::{
    MCTSOptions, MCTSPolicies, MeanValue, MostVisitedExtract, OptionInitializer, OptionSampler,
    ProgressiveWidening, RandomRollout, Search, SearchAlgorithm, SearchTree, UctScore,
};
use serde::Serialize;

use crate::options::ClientOptions;
use crate::world::{Jump, LineState, LineWorld};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub algorithm: String,
    pub jumps: Vec<Jump>,
    pub final_position: Option<i64>,
    pub reached_target: bool,
    pub nodes: usize,
    pub elapsed_secs: f64,
    pub rollout_estimate: f32,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let jumps = self
            .jumps
            .iter()
            .map(|jump| format!("{:+}", jump.0))
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "{}: [{}] final position: {:?} reached target: {} nodes: {} elapsed: {:.3}s",
            self.algorithm,
            jumps,
            self.final_position,
            self.reached_target,
            self.nodes,
            self.elapsed_secs
        )
    }
}

fn jumps(_: &LineState) -> Vec<Jump> {
    Jump::all()
}

pub fn run(options: &ClientOptions, mcts_options: MCTSOptions) -> Result<Report> {
    let algorithm = options.search_algorithm()?;
    let world = LineWorld::new(options.target, options.horizon);
    let mut tree: SearchTree<LineWorld, MeanValue> =
        SearchTree::new(&world, Transition::initial(LineState::new(options.start)));

    let rollout = match options.seed {
        Some(seed) => RandomRollout::with_seed(jumps, seed),
        None => RandomRollout::new(jumps),
    };

    let mut builder = MCTSPolicies::builder(mcts_options)
        .score(UctScore::new(options.exploration))
        .widen(ProgressiveWidening::new(
            options.widening_k,
            options.widening_alpha,
        ))
        .sample(OptionSampler::new(Jump::all()))
        .rollout(rollout)
        .extract(MostVisitedExtract);

    if let SearchAlgorithm::DepthFirst(_) = algorithm {
        builder = builder.initialize(OptionInitializer::new(Jump::all()));
    }

    let policies = builder.build();

    info!(
        "Searching with {} from {} towards {}",
        algorithm,
        options.start,
        world.target()
    );

    let outcome = algorithm.search(&mut tree, &policies)?;
    let rollout_estimate = policies.rollout(&tree, tree.root(), options.horizon)?;

    let final_position = outcome
        .leaf()
        .and_then(|leaf| tree[leaf].state())
        .map(|state| state.position);

    let report = Report {
        algorithm: algorithm.to_string(),
        jumps: tree
            .actions_on_path(&outcome.path)
            .into_iter()
            .copied()
            .collect(),
        final_position,
        reached_target: final_position == Some(world.target()),
        nodes: tree.len(),
        elapsed_secs: outcome.elapsed_secs(),
        rollout_estimate,
    };

    info!("Random rollout estimate from the start: {:.3}", rollout_estimate);

    Ok(report)
}
