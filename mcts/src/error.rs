use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::NodeId;

/// The optional strategy slots of an [`MCTSPolicies`](crate::MCTSPolicies) bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Score,
    Widen,
    Sample,
    Rollout,
    Initialize,
    Extract,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Capability::Score => "score",
            Capability::Widen => "widen",
            Capability::Sample => "sample",
            Capability::Rollout => "rollout",
            Capability::Initialize => "initialize",
            Capability::Extract => "extract",
        };

        f.write_str(name)
    }
}

/// Conditions raised by the search itself.
///
/// These travel inside `anyhow::Error` and can be recovered with `downcast_ref::<SearchError>()`.
/// Failures raised by the engine or by a strategy are propagated as-is and never wrapped.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("{operation} requires the {capability} capability but none was provided")]
    MissingCapability {
        operation: &'static str,
        capability: Capability,
    },

    #[error("node {0:?} was walked before it was instantiated")]
    UninitializedNode(NodeId),

    #[error("node {0:?} is terminal and cannot gain children")]
    TerminalExpansion(NodeId),

    #[error("node {0:?} does not exist in this tree")]
    InvalidNode(NodeId),
}
