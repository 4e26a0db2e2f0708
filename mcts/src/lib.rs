#[cfg(test)]
mod counting_game;
mod error;
pub mod extract;
mod node;
pub mod node_value;
pub mod observer;
pub mod option_list;
pub mod options;
pub mod policies;
pub mod random_rollout;
pub mod search;
pub mod selection;
mod tree;
pub mod uct;
pub mod widening;

pub use error::*;
pub use extract::*;
pub use node::*;
pub use node_value::*;
pub use observer::*;
pub use option_list::*;
pub use options::*;
pub use policies::*;
pub use random_rollout::*;
pub use search::*;
pub use selection::*;
pub use tree::*;
pub use uct::*;
pub use widening::*;
