use std::{collections::HashMap, path::Path};

use anyhow::{anyhow, Context, Result};
use hocon::{Hocon, HoconLoader};
use log::debug;

/// Scoped view over a HOCON document.
///
/// Lookups check the environment first, then the configured scope, then the top level of
/// the document. Environment keys are the scope and the name joined by `_` and upper-cased,
/// e.g. `SEARCH_MAX_DEPTH` for `max_depth` in scope `search`.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(anyhow!("The config file {:?} was not found", path));
        }

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        Ok(Self::from_hocon(hocon, scope))
    }

    pub fn from_str(source: &str, scope: impl Into<String>) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(source)
            .context("Failed to parse config")?
            .hocon()?;

        Ok(Self::from_hocon(hocon, scope))
    }

    /// Replaces the captured process environment. Mostly useful for tests.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    fn from_hocon(hocon: Hocon, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        debug!("Loaded config with scope '{}'", scope);

        Self {
            hocon,
            env: std::env::vars().collect(),
            scope,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(&self.env_key(name)) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    pub fn env_key(&self, name: &str) -> String {
        format!("{}_{}", self.scope, name).to_uppercase()
    }

    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|v| v.as_usize())
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_i64())
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|v| v.as_f32())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.as_string())
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        T::load(self).with_context(|| format!("Failed to load config scope '{}'", self.scope))
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64 as f32)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f32),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => usize::try_from(*val).ok(),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f32),
            Value::String(val) => val.parse::<f32>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(val) => Some(val.to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const SOURCE: &str = r#"
        max_depth = 4
        search {
            max_depth = 12
            dfs = true
            exploration = 1.5
            algorithm = "mcts"
        }
    "#;

    fn loader() -> ConfigLoader {
        ConfigLoader::from_str(SOURCE, "search")
            .unwrap()
            .with_env(HashMap::new())
    }

    #[test]
    fn test_scope_takes_precedence_over_top_level() {
        assert_eq!(loader().get_usize("max_depth"), Some(12));
    }

    #[test]
    fn test_falls_back_to_top_level() {
        let config = ConfigLoader::from_str(SOURCE, "missing")
            .unwrap()
            .with_env(HashMap::new());

        assert_eq!(config.get_usize("max_depth"), Some(4));
        assert_eq!(config.get_bool("dfs"), None);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = HashMap::from([("SEARCH_MAX_DEPTH".to_string(), "7".to_string())]);
        let config = loader().with_env(env);

        assert_eq!(config.env_key("max_depth"), "SEARCH_MAX_DEPTH");
        assert_eq!(config.get_usize("max_depth"), Some(7));
    }

    #[test]
    fn test_unscoped_env_is_ignored() {
        let env = HashMap::from([
            ("MAX_DEPTH".to_string(), "7".to_string()),
            ("DFS".to_string(), "false".to_string()),
        ]);
        let config = loader().with_env(env);

        assert_eq!(config.get_usize("max_depth"), Some(12));
        assert_eq!(config.get_bool("dfs"), Some(true));
    }

    #[test]
    fn test_typed_getters() {
        let config = loader();

        assert_eq!(config.get_bool("dfs"), Some(true));
        assert_approx_eq!(config.get_f32("exploration").unwrap(), 1.5);
        assert_eq!(config.get_string("algorithm").as_deref(), Some("mcts"));
        assert_eq!(config.get("unknown"), None);
    }

    #[test]
    fn test_negative_integer_is_not_a_usize() {
        assert_eq!(Value::Integer(-3).as_usize(), None);
        assert_eq!(Value::Integer(-3).as_i64(), Some(-3));
        assert_approx_eq!(Value::Integer(-3).as_f32().unwrap(), -3.0);
    }
}
