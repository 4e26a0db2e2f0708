pub mod engine;
pub mod transition;

pub use crate::engine::*;
pub use crate::transition::*;
