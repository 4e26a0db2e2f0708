/// Outcome of forking a world state with an action applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub reward: f32,
    pub terminal: bool,
}

impl<S> Transition<S> {
    pub fn new(state: S, reward: f32, terminal: bool) -> Self {
        Self {
            state,
            reward,
            terminal,
        }
    }

    /// A non-terminal state carrying no reward. Typically used for the root of a search.
    pub fn initial(state: S) -> Self {
        Self::new(state, 0.0, false)
    }

    pub fn terminal(state: S, reward: f32) -> Self {
        Self::new(state, reward, true)
    }
}
