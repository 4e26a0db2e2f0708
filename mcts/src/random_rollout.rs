use std::cell::RefCell;

use anyhow::Result;
use engine::Engine;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{NodeId, Rollout, SearchError, SearchTree};

/// Plays uniformly random actions forward from a node and sums the collected rewards.
///
/// `actions` lists the actions available from a state. The rollout ends early once a
/// terminal state is reached or no action is available.
pub struct RandomRollout<F> {
    actions: F,
    rng: RefCell<StdRng>,
}

impl<F> RandomRollout<F> {
    pub fn new(actions: F) -> Self {
        Self {
            actions,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(actions: F, seed: u64) -> Self {
        Self {
            actions,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl<E, V, F> Rollout<E, V> for RandomRollout<F>
where
    E: Engine,
    F: Fn(&E::State) -> Vec<E::Action>,
{
    fn rollout(&self, tree: &SearchTree<'_, E, V>, node: NodeId, depth: usize) -> Result<f32> {
        let start = tree.get(node)?;
        if start.is_terminal() {
            return Ok(0.0);
        }

        let start_state = start.state().ok_or(SearchError::UninitializedNode(node))?;
        let engine = tree.engine();
        let mut rng = self.rng.borrow_mut();
        let mut current: Option<E::State> = None;
        let mut total_reward = 0.0;

        for _ in 0..depth {
            let state = current.as_ref().unwrap_or(start_state);
            let actions = (self.actions)(state);
            let Some(action) = actions.choose(&mut *rng) else {
                break;
            };

            let transition = engine.fork(state, action)?;
            total_reward += transition.reward;

            if transition.terminal {
                break;
            }

            current = Some(transition.state);
        }

        Ok(total_reward)
    }
}
