use anyhow::Result;

use super::transition::Transition;

/// The world collaborator searched over.
///
/// `fork` produces the state reached by applying `action` to `state`. The parent state
/// is only borrowed and must remain valid and unmodified; the returned state is owned
/// exclusively by the node it is attached to.
pub trait Engine {
    type State;
    type Action;

    fn fork(&self, state: &Self::State, action: &Self::Action) -> Result<Transition<Self::State>>;
}

impl<E> Engine for &E
where
    E: Engine + ?Sized,
{
    type State = E::State;
    type Action = E::Action;

    fn fork(&self, state: &Self::State, action: &Self::Action) -> Result<Transition<Self::State>> {
        (**self).fork(state, action)
    }
}
