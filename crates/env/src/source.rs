//! Read-only access to raw environment values

use indexmap::IndexMap;
use std::path::Path;
use typenv_core::{Error, Result};

/// Key-value string store the typed readers pull raw values from
///
/// An absent key and an empty value are treated the same by every reader.
pub trait EnvSource: Send + Sync {
    /// Get the raw value for `key`, `None` if it is not set
    fn var(&self, key: &str) -> Option<String>;

    /// Get the raw value, treating the empty string as absent
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-unicode values are unreadable as configuration and count as unset
        std::env::var(key).ok()
    }
}

/// In-memory environment, used by tests and for `.env` files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: IndexMap<String, String>,
}

impl MapEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Load a `.env` file without touching the process environment
    pub fn from_dotenv_file(path: &Path) -> Result<Self> {
        let iter = dotenv::from_path_iter(path).map_err(|e| {
            Error::configuration(format!("failed to open env file '{}': {e}", path.display()))
        })?;

        let mut env = Self::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                Error::configuration(format!("failed to parse env file '{}': {e}", path.display()))
            })?;
            env.insert(key, value);
        }

        tracing::debug!(path = %path.display(), count = env.len(), "loaded env file");
        Ok(env)
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_map_env_treats_empty_as_absent() {
        let env = MapEnv::new().with("EMPTY", "").with("SET", "1");

        assert_eq!(env.var("EMPTY"), Some(String::new()));
        assert_eq!(env.non_empty_var("EMPTY"), None);
        assert_eq!(env.non_empty_var("SET"), Some("1".to_string()));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_from_iterator() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.len(), 2);
        assert_eq!(env.var("B"), Some("2".to_string()));
    }

    #[test]
    fn test_from_dotenv_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "PORT=8080\n# comment\nHOSTS=\"a,b\"\n").unwrap();

        let env = MapEnv::from_dotenv_file(&path).unwrap();
        assert_eq!(env.var("PORT"), Some("8080".to_string()));
        assert_eq!(env.var("HOSTS"), Some("a,b".to_string()));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_from_missing_dotenv_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = MapEnv::from_dotenv_file(&temp_dir.path().join("nope.env"));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
