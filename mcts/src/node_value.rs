use serde::{Deserialize, Serialize};

/// Per-node statistics updated during backpropagation.
///
/// `acc_reward` is the sum of rewards from this node down to the deepest node reached by
/// the walk, `final_reward` is the reward of that deepest node and `steps` is the length
/// of the walk.
pub trait NodeValue {
    fn update(&mut self, acc_reward: f32, final_reward: f32, steps: usize);
}

/// A scalar read out of the node statistics, used by the stock score and extract strategies.
pub trait PropagatedValue {
    fn value(&self) -> f32;
}

#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MeanValue {
    num_updates: usize,
    total_reward: f32,
    best_final_reward: Option<f32>,
    total_steps: usize,
}

impl MeanValue {
    pub fn num_updates(&self) -> usize {
        self.num_updates
    }

    pub fn total_reward(&self) -> f32 {
        self.total_reward
    }

    pub fn mean(&self) -> f32 {
        self.per_update(self.total_reward)
    }

    pub fn best_final_reward(&self) -> Option<f32> {
        self.best_final_reward
    }

    pub fn mean_steps(&self) -> f32 {
        self.per_update(self.total_steps as f32)
    }

    fn per_update(&self, total: f32) -> f32 {
        if self.num_updates == 0 {
            0.0
        } else {
            total / self.num_updates as f32
        }
    }
}

impl NodeValue for MeanValue {
    fn update(&mut self, acc_reward: f32, final_reward: f32, steps: usize) {
        self.num_updates += 1;
        self.total_reward += acc_reward;
        self.total_steps += steps;
        self.best_final_reward = Some(
            self.best_final_reward
                .map_or(final_reward, |best| best.max(final_reward)),
        );
    }
}

impl PropagatedValue for MeanValue {
    fn value(&self) -> f32 {
        self.mean()
    }
}
