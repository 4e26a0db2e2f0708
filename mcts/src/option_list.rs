use anyhow::Result;
use engine::Engine;

use crate::{Initialize, NodeId, Sample, SearchTree};

/// Samples from a fixed, state independent list of options, in order, skipping options
/// the node already has a child for.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionSampler<A> {
    options: Vec<A>,
}

impl<A> OptionSampler<A> {
    pub fn new(options: Vec<A>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[A] {
        &self.options
    }
}

impl<E, V, A> Sample<E, V> for OptionSampler<A>
where
    E: Engine<Action = A>,
    A: Clone + PartialEq,
{
    fn sample(&self, tree: &SearchTree<'_, E, V>, node: NodeId) -> Result<Option<A>> {
        let explored = tree.get(node)?.children();

        Ok(self
            .options
            .iter()
            .find(|option| {
                !explored
                    .iter()
                    .any(|child| tree[*child].action() == Some(*option))
            })
            .cloned())
    }

    fn num_options(&self) -> Option<usize> {
        Some(self.options.len())
    }

    fn option(&self, _: &SearchTree<'_, E, V>, _: NodeId, idx: usize) -> Option<A> {
        self.options.get(idx).cloned()
    }
}

/// Attaches every option as an unexplored child of each non-terminal node it initializes.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionInitializer<A> {
    options: Vec<A>,
}

impl<A> OptionInitializer<A> {
    pub fn new(options: Vec<A>) -> Self {
        Self { options }
    }
}

impl<E, V, A> Initialize<E, V> for OptionInitializer<A>
where
    E: Engine<Action = A>,
    V: Default,
    A: Clone,
{
    fn initialize(&self, tree: &mut SearchTree<'_, E, V>, node: NodeId) -> Result<()> {
        let current = tree.get(node)?;
        if current.is_terminal() || current.has_children() {
            return Ok(());
        }

        for option in &self.options {
            tree.add_child(node, option.clone())?;
        }

        Ok(())
    }
}
