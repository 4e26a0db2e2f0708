use anyhow::Result;
use engine::{Engine, Transition};

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct CountingState {
    pub count: i32,
    pub moves: usize,
}

impl CountingState {
    pub fn new(count: i32) -> Self {
        Self { count, moves: 0 }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CountingAction {
    Increment,
    Decrement,
    Stay,
}

impl CountingAction {
    pub fn all() -> Vec<Self> {
        vec![Self::Increment, Self::Decrement, Self::Stay]
    }
}

/// Count from a starting value to `goal` within `horizon` moves.
pub struct CountingEngine {
    goal: i32,
    horizon: usize,
}

impl CountingEngine {
    pub const STEP_REWARD: f32 = -0.01;
    pub const GOAL_REWARD: f32 = 1.0;

    pub fn new(goal: i32, horizon: usize) -> Self {
        Self { goal, horizon }
    }
}

impl Engine for CountingEngine {
    type State = CountingState;
    type Action = CountingAction;

    fn fork(&self, state: &Self::State, action: &Self::Action) -> Result<Transition<Self::State>> {
        let count = match action {
            CountingAction::Increment => state.count + 1,
            CountingAction::Decrement => state.count - 1,
            CountingAction::Stay => state.count,
        };

        let next = CountingState {
            count,
            moves: state.moves + 1,
        };

        if count == self.goal {
            return Ok(Transition::terminal(next, Self::GOAL_REWARD));
        }

        let out_of_moves = next.moves >= self.horizon;

        Ok(Transition::new(next, Self::STEP_REWARD, out_of_moves))
    }
}
