//! Frozen catalogue metadata for one configuration key

use super::config::Constraints;
use super::env_type::EnvType;
use super::value::EnvValue;
use std::fmt;
use std::sync::Arc;

/// Type-erased custom predicate stored in the catalogue
pub type VerifyFn = Arc<dyn Fn(&EnvValue) -> bool + Send + Sync>;

/// Metadata recorded the first time a key is read
///
/// Entries are shared as `Arc<ConfigEntry>` and never change after
/// registration.
#[derive(Clone)]
pub struct ConfigEntry {
    pub key: String,
    pub env_type: EnvType,
    pub default_value: Option<EnvValue>,
    pub description: Option<String>,
    pub is_required: bool,
    pub constraints: Constraints,
    pub verify_function: Option<VerifyFn>,
}

impl ConfigEntry {
    /// Bare entry with no default, description or constraints
    #[must_use]
    pub fn new(key: impl Into<String>, env_type: EnvType) -> Self {
        Self {
            key: key.into(),
            env_type,
            default_value: None,
            description: None,
            is_required: false,
            constraints: Constraints::default(),
            verify_function: None,
        }
    }

    #[must_use]
    pub fn has_custom_validation(&self) -> bool {
        self.verify_function.is_some()
    }
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("key", &self.key)
            .field("env_type", &self.env_type)
            .field("default_value", &self.default_value)
            .field("description", &self.description)
            .field("is_required", &self.is_required)
            .field("constraints", &self.constraints)
            .field("verify_function", &self.verify_function.is_some())
            .finish()
    }
}
