use anyhow::{ensure, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MCTSOptions {
    /// Upper bound on the number of nodes walked by a single selection.
    pub max_depth: usize,
    /// Allow a node without children to be widened even after this selection already added a child.
    pub dfs: bool,
}

impl MCTSOptions {
    pub fn new(max_depth: usize, dfs: bool) -> Self {
        Self { max_depth, dfs }
    }
}

impl Default for MCTSOptions {
    fn default() -> Self {
        Self {
            max_depth: 10,
            dfs: false,
        }
    }
}

impl Config for MCTSOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();
        let options = Self {
            max_depth: config.get_usize("max_depth").unwrap_or(defaults.max_depth),
            dfs: config.get_bool("dfs").unwrap_or(defaults.dfs),
        };

        ensure!(options.max_depth > 0, "max_depth must be greater than zero");

        Ok(options)
    }
}
