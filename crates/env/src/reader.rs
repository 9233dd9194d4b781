//! Typed read operations over an environment source
//!
//! Every read follows the same pipeline: fetch the raw value, register the
//! key's declaration in the catalogue (first declaration wins), coerce, then
//! validate against the *registered* declaration. Reading a key twice with
//! different configs therefore behaves exactly like the first declaration.
//!
//! The reader method still decides the coercion. When a key is read through
//! a different reader than the one that declared it, a registered default
//! of the other shape is unusable and reads as no default, and a registered
//! custom predicate of the other type does not apply.

use crate::catalogue::Catalogue;
use crate::coerce;
use crate::source::{EnvSource, ProcessEnv};
use crate::validator;
use serde_json::Value;
use std::sync::Arc;
use typenv_core::{
    ConfigEntry, EnvConfig, EnvType, EnvValue, EnvValueType, Result, BOOL_UNSET_TOKENS,
};

/// Bootstrap-owned handle pairing an environment source with a catalogue
///
/// Cloning is cheap and every clone shares the same catalogue.
#[derive(Clone)]
pub struct Environment {
    catalogue: Arc<Catalogue>,
    source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("catalogue", &self.catalogue)
            .finish_non_exhaustive()
    }
}

impl Environment {
    /// Read from `source` with a fresh, empty catalogue
    pub fn new(source: impl EnvSource + 'static) -> Self {
        Self::with_catalogue(Arc::new(source), Arc::new(Catalogue::new()))
    }

    /// Read from the real process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(ProcessEnv)
    }

    /// Read from `source`, recording declarations into an existing catalogue
    #[must_use]
    pub fn with_catalogue(source: Arc<dyn EnvSource>, catalogue: Arc<Catalogue>) -> Self {
        Self { catalogue, source }
    }

    #[must_use]
    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    /// Raw value or `default` when unset or empty; declares nothing
    #[must_use]
    pub fn raw(&self, key: &str, default: &str) -> String {
        self.source
            .non_empty_var(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Base-10 integer; unparseable values fall back to the default
    pub fn int(&self, key: &str, config: &EnvConfig<i64>) -> Result<Option<i64>> {
        self.typed(EnvType::Int, key, config)
    }

    /// Comma-separated integers; `1,2,3,a,,5` reads as `[1, 2, 3, 5]`
    pub fn ints(&self, key: &str, config: &EnvConfig<Vec<i64>>) -> Result<Vec<i64>> {
        Ok(self.typed(EnvType::Ints, key, config)?.unwrap_or_default())
    }

    /// Truthy tokens `YES 1 TRUE ON Y V O T`, case-insensitive
    pub fn bool(&self, key: &str, config: &EnvConfig<bool>) -> Result<bool> {
        Ok(self.typed(EnvType::Bool, key, config)?.unwrap_or(false))
    }

    /// String value, falling back to the default and then to `""`
    pub fn str(&self, key: &str, config: &EnvConfig<String>) -> Result<String> {
        Ok(self.typed(EnvType::Str, key, config)?.unwrap_or_default())
    }

    /// Comma-separated strings; `a,b,c,,d,5` reads as `["a", "b", "c", "d", "5"]`
    pub fn strs(&self, key: &str, config: &EnvConfig<Vec<String>>) -> Result<Vec<String>> {
        Ok(self.typed(EnvType::Strs, key, config)?.unwrap_or_default())
    }

    /// Strings collected from `KEY_0`, `KEY_1`, ... up to the first gap
    pub fn array(&self, key: &str, config: &EnvConfig<Vec<String>>) -> Result<Vec<String>> {
        Ok(self.typed(EnvType::Array, key, config)?.unwrap_or_default())
    }

    /// Any JSON document; parse failures fall back to the default
    pub fn json(&self, key: &str, config: &EnvConfig<Value>) -> Result<Option<Value>> {
        self.typed(EnvType::Json, key, config)
    }

    /// Read with the type chosen at runtime, used for declaration files
    pub fn read(
        &self,
        env_type: EnvType,
        key: &str,
        config: &EnvConfig<EnvValue>,
    ) -> Result<Option<EnvValue>> {
        let entry = self.catalogue.register(config.to_entry(key, env_type));
        self.read_entry(&entry, env_type)
    }

    fn typed<T: EnvValueType>(
        &self,
        env_type: EnvType,
        key: &str,
        config: &EnvConfig<T>,
    ) -> Result<Option<T>> {
        let entry = self.catalogue.register(config.to_entry(key, env_type));
        let value = self.read_entry(&entry, env_type)?;
        Ok(value.as_ref().and_then(T::from_env_value))
    }

    /// Coerce and validate using the registered entry's metadata
    fn read_entry(&self, entry: &ConfigEntry, env_type: EnvType) -> Result<Option<EnvValue>> {
        let key = entry.key.as_str();
        let trim = !entry.constraints.disabled_trim;
        let default = entry.default_value.as_ref();

        let (value, raw_present) = if env_type == EnvType::Array {
            let found = coerce::collect_indexed(self.source.as_ref(), key, trim);
            let present = !found.is_empty();
            let default = default.and_then(<Vec<String>>::from_env_value);
            (Some(EnvValue::Strs(coerce::coerce_array(found, default))), present)
        } else {
            let raw = self.source.var(key);
            let raw = raw.as_deref();
            let present = raw.is_some_and(|raw| is_present(env_type, raw, trim));
            (coerce_raw(env_type, raw, default), present)
        };

        if !raw_present && default.is_some() {
            tracing::trace!(key, env_type = %env_type, "using default value");
        }

        validator::validate(entry, value, raw_present)
    }
}

fn coerce_raw(env_type: EnvType, raw: Option<&str>, default: Option<&EnvValue>) -> Option<EnvValue> {
    match env_type {
        EnvType::Int => coerce::coerce_int(raw, default.and_then(i64::from_env_value))
            .map(EnvValue::Int),
        EnvType::Ints => Some(EnvValue::Ints(coerce::coerce_ints(
            raw,
            default.and_then(<Vec<i64>>::from_env_value),
        ))),
        EnvType::Bool => Some(EnvValue::Bool(coerce::coerce_bool(
            raw,
            default.and_then(bool::from_env_value),
        ))),
        EnvType::Str => {
            let default = default.and_then(String::from_env_value);
            Some(EnvValue::Str(coerce::coerce_str(raw, default.as_deref())))
        }
        EnvType::Strs | EnvType::Array => Some(EnvValue::Strs(coerce::coerce_strs(
            raw,
            default.and_then(<Vec<String>>::from_env_value),
        ))),
        EnvType::Json => coerce::coerce_json(raw, default.and_then(Value::from_env_value))
            .map(EnvValue::Json),
    }
}

/// Whether a raw value counts as set for the required check
fn is_present(env_type: EnvType, raw: &str, trim: bool) -> bool {
    let raw = if trim { raw.trim() } else { raw };
    match env_type {
        EnvType::Bool => !BOOL_UNSET_TOKENS.contains(&raw.trim().to_uppercase().as_str()),
        _ => !raw.is_empty(),
    }
}
