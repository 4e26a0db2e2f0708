use anyhow::{ensure, Result};
use common::{Config, ConfigLoader};
use mcts::SearchAlgorithm;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClientOptions {
    pub algorithm: String,
    pub iterations: usize,
    pub max_expansions: usize,
    pub exploration: f32,
    pub widening_k: f32,
    pub widening_alpha: f32,
    pub start: i64,
    pub target: i64,
    pub horizon: usize,
    pub seed: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            algorithm: "mcts".to_string(),
            iterations: 2000,
            max_expansions: 4,
            exploration: 1.0,
            widening_k: 1.0,
            widening_alpha: 0.5,
            start: 0,
            target: 7,
            horizon: 6,
            seed: None,
        }
    }
}

impl ClientOptions {
    pub fn search_algorithm(&self) -> Result<SearchAlgorithm> {
        SearchAlgorithm::from_options(&self.algorithm, self.max_expansions, self.iterations)
    }
}

impl Config for ClientOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();
        let options = Self {
            algorithm: config.get_string("algorithm").unwrap_or(defaults.algorithm),
            iterations: config.get_usize("iterations").unwrap_or(defaults.iterations),
            max_expansions: config
                .get_usize("max_expansions")
                .unwrap_or(defaults.max_expansions),
            exploration: config.get_f32("exploration").unwrap_or(defaults.exploration),
            widening_k: config.get_f32("widening_k").unwrap_or(defaults.widening_k),
            widening_alpha: config
                .get_f32("widening_alpha")
                .unwrap_or(defaults.widening_alpha),
            start: config.get_i64("start").unwrap_or(defaults.start),
            target: config.get_i64("target").unwrap_or(defaults.target),
            horizon: config.get_usize("horizon").unwrap_or(defaults.horizon),
            seed: config
                .get_usize("seed")
                .map(|seed| seed as u64)
                .or(defaults.seed),
        };

        options.search_algorithm()?;
        ensure!(options.horizon > 0, "horizon must be greater than zero");
        ensure!(
            options.widening_k > 0.0,
            "widening_k must be positive, got {}",
            options.widening_k
        );

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use mcts::{DepthFirstSearch, MonteCarloTreeSearch};

    fn load(source: &str, env: &[(&str, &str)]) -> Result<ClientOptions> {
        let env = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        ConfigLoader::from_str(source, "search")?
            .with_env(env)
            .load::<ClientOptions>()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load("search {}", &[]).unwrap(), ClientOptions::default());
    }

    #[test]
    fn test_values_and_env_override() {
        let source = r#"search { algorithm = "dfs", max_expansions = 3, target = -5, seed = 9 }"#;
        let options = load(source, &[("SEARCH_TARGET", "12"), ("TARGET", "99")]).unwrap();

        assert_eq!(options.target, 12);
        assert_eq!(options.seed, Some(9));
        assert_eq!(
            options.search_algorithm().unwrap(),
            SearchAlgorithm::DepthFirst(DepthFirstSearch::new(3))
        );
    }

    #[test]
    fn test_limit_follows_algorithm() {
        let source = r#"search { algorithm = "mcts", iterations = 50, max_expansions = 2 }"#;
        let options = load(source, &[]).unwrap();

        assert_eq!(
            options.search_algorithm().unwrap(),
            SearchAlgorithm::MonteCarlo(MonteCarloTreeSearch::new(50))
        );
    }

    #[test]
    fn test_negative_target() {
        let options = load("search { target = -5 }", &[]).unwrap();

        assert_eq!(options.target, -5);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(load(r#"search { algorithm = "beam" }"#, &[]).is_err());
    }
}
