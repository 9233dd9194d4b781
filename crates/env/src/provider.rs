//! Deferred typed reads for dependency-injection containers
//!
//! A [`Provider`] pairs a token (the environment key) with a factory that
//! performs the typed read only when resolved. Nothing is registered in the
//! catalogue until the factory runs.

use crate::reader::Environment;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use typenv_core::{EnvConfig, Result};

type Factory<T> = Arc<dyn Fn() -> Result<T> + Send + Sync>;

/// `{ provide, use_factory }` pair resolved lazily by an injection container
pub struct Provider<T> {
    provide: String,
    factory: Factory<T>,
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            provide: self.provide.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("provide", &self.provide)
            .finish_non_exhaustive()
    }
}

impl<T> Provider<T> {
    pub fn new<F>(provide: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            provide: provide.into(),
            factory: Arc::new(factory),
        }
    }

    /// Injection token, identical to the environment key
    #[must_use]
    pub fn provide(&self) -> &str {
        &self.provide
    }

    /// Run the deferred read
    pub fn use_factory(&self) -> Result<T> {
        (self.factory)()
    }
}

/// Build a provider whose factory calls `Environment::$method`
macro_rules! typed_provider {
    ($method:ident, $config:ty, $output:ty) => {
        impl Provider<$output> {
            pub fn $method(
                env: &Environment,
                provide: impl Into<String>,
                config: EnvConfig<$config>,
            ) -> Self {
                let env = env.clone();
                let provide = provide.into();
                let key = provide.clone();
                Self::new(provide, move || env.$method(&key, &config))
            }
        }
    };
}

typed_provider!(int, i64, Option<i64>);
typed_provider!(ints, Vec<i64>, Vec<i64>);
typed_provider!(bool, bool, bool);
typed_provider!(str, String, String);
typed_provider!(strs, Vec<String>, Vec<String>);
typed_provider!(array, Vec<String>, Vec<String>);
typed_provider!(json, Value, Option<Value>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapEnv;
    use typenv_core::Error;

    #[test]
    fn test_provider_defers_the_read() {
        let env = Environment::new(MapEnv::new().with("PORT", "8080"));
        let provider = Provider::int(&env, "PORT", EnvConfig::new().max(65535));

        assert_eq!(provider.provide(), "PORT");
        assert!(env.catalogue().is_empty());

        assert_eq!(provider.use_factory().unwrap(), Some(8080));
        assert!(env.catalogue().contains("PORT"));
    }

    #[test]
    fn test_provider_surfaces_validation_errors() {
        let env = Environment::new(MapEnv::new());
        let provider = Provider::str(&env, "API_TOKEN", EnvConfig::new().required());

        assert!(matches!(
            provider.use_factory(),
            Err(Error::RequiredMissing { .. })
        ));
    }

    #[test]
    fn test_list_providers() {
        let env = Environment::new(
            MapEnv::new()
                .with("TAGS", "a, b")
                .with("PEERS_0", "x")
                .with("PEERS_1", "y"),
        );

        let tags = Provider::strs(&env, "TAGS", EnvConfig::new());
        let peers = Provider::array(&env, "PEERS", EnvConfig::new());
        let flag = Provider::bool(&env, "FLAG", EnvConfig::new().default_value(true));

        assert_eq!(tags.use_factory().unwrap(), vec!["a", "b"]);
        assert_eq!(peers.clone().use_factory().unwrap(), vec!["x", "y"]);
        assert!(flag.use_factory().unwrap());
    }
}
