use anyhow::{ensure, Result};
use engine::{Engine, Transition};
use serde::Serialize;

/// Moves the walker by the given, non-zero offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Jump(pub i64);

impl Jump {
    pub fn all() -> Vec<Jump> {
        vec![Jump(-2), Jump(-1), Jump(1), Jump(2)]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineState {
    pub position: i64,
    pub moves: usize,
}

impl LineState {
    pub fn new(position: i64) -> Self {
        Self { position, moves: 0 }
    }
}

/// A walker on the integer line trying to land exactly on `target` within `horizon` jumps.
#[derive(Clone, Debug)]
pub struct LineWorld {
    target: i64,
    horizon: usize,
}

impl LineWorld {
    pub const MOVE_COST: f32 = -0.05;
    pub const TARGET_REWARD: f32 = 1.0;

    pub fn new(target: i64, horizon: usize) -> Self {
        Self { target, horizon }
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

impl Engine for LineWorld {
    type State = LineState;
    type Action = Jump;

    fn fork(&self, state: &LineState, jump: &Jump) -> Result<Transition<LineState>> {
        ensure!(jump.0 != 0, "A jump must move the walker");

        let next = LineState {
            position: state.position + jump.0,
            moves: state.moves + 1,
        };

        if next.position == self.target {
            return Ok(Transition::terminal(next, Self::TARGET_REWARD));
        }

        let terminal = next.moves >= self.horizon;

        Ok(Transition::new(next, Self::MOVE_COST, terminal))
    }
}
