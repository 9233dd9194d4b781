//! Caller-facing declaration builder for a configuration key

use super::entry::{ConfigEntry, VerifyFn};
use super::env_type::EnvType;
use super::value::{EnvValue, EnvValueType};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Declarative rules a coerced value must satisfy
///
/// Rules that do not apply to a key's type are ignored.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// Lower bound for `int` values and `ints` elements
    pub min: Option<i64>,
    /// Upper bound for `int` values and `ints` elements
    pub max: Option<i64>,
    /// Character count for `str`, element count for list types
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Closed set of permitted values, compared as JSON
    pub enum_values: Vec<Value>,
    /// Applies to `str` values and `strs`/`array` elements
    pub pattern: Option<Regex>,
    /// Keep surrounding whitespace on string values
    pub disabled_trim: bool,
}

/// Typed declaration passed to every read
///
/// ```
/// use typenv_core::EnvConfig;
///
/// let config = EnvConfig::<i64>::new()
///     .default_value(8080)
///     .description("HTTP listen port")
///     .min(1)
///     .max(65535);
/// assert_eq!(config.default_value, Some(8080));
/// ```
pub struct EnvConfig<T> {
    pub default_value: Option<T>,
    pub description: Option<String>,
    pub is_required: bool,
    pub constraints: Constraints,
    pub verify_function: Option<Arc<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T> Default for EnvConfig<T> {
    fn default() -> Self {
        Self {
            default_value: None,
            description: None,
            is_required: false,
            constraints: Constraints::default(),
            verify_function: None,
        }
    }
}

impl<T: Clone> Clone for EnvConfig<T> {
    fn clone(&self) -> Self {
        Self {
            default_value: self.default_value.clone(),
            description: self.description.clone(),
            is_required: self.is_required,
            constraints: self.constraints.clone(),
            verify_function: self.verify_function.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EnvConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("default_value", &self.default_value)
            .field("description", &self.description)
            .field("is_required", &self.is_required)
            .field("constraints", &self.constraints)
            .field("verify_function", &self.verify_function.is_some())
            .finish()
    }
}

impl<T> EnvConfig<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fail the read when the raw value is absent or empty, even with a default
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: i64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: i64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.constraints.min_length = Some(min_length);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.constraints.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.constraints.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn disabled_trim(mut self) -> Self {
        self.constraints.disabled_trim = true;
        self
    }

    /// Arbitrary predicate over the final value; a panic counts as `false`
    #[must_use]
    pub fn verify<F>(mut self, verify: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.verify_function = Some(Arc::new(verify));
        self
    }
}

impl<T: EnvValueType> EnvConfig<T> {
    /// Freeze this declaration into the type-erased catalogue form
    ///
    /// The erased predicate passes values that are not of type `T`, which
    /// happens when a key is later read through a different reader.
    #[must_use]
    pub fn to_entry(&self, key: impl Into<String>, env_type: EnvType) -> ConfigEntry {
        let verify_function = self.verify_function.clone().map(|verify| -> VerifyFn {
            Arc::new(move |value: &EnvValue| {
                T::from_env_value(value).map_or(true, |typed| verify(&typed))
            })
        });

        ConfigEntry {
            key: key.into(),
            env_type,
            default_value: self.default_value.clone().map(EnvValueType::into_env_value),
            description: self.description.clone(),
            is_required: self.is_required,
            constraints: self.constraints.clone(),
            verify_function,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_constraints() {
        let config = EnvConfig::<String>::new()
            .default_value("info".to_string())
            .enum_values(["debug", "info", "warn"])
            .min_length(3)
            .disabled_trim();

        assert_eq!(config.constraints.enum_values.len(), 3);
        assert_eq!(config.constraints.min_length, Some(3));
        assert!(config.constraints.disabled_trim);
        assert!(!config.is_required);
    }

    #[test]
    fn test_to_entry_erases_types() {
        let config = EnvConfig::<i64>::new()
            .default_value(10)
            .required()
            .verify(|n| n % 2 == 0);
        let entry = config.to_entry("WORKERS", EnvType::Int);

        assert_eq!(entry.key, "WORKERS");
        assert_eq!(entry.default_value, Some(EnvValue::Int(10)));
        assert!(entry.is_required);

        let verify = entry.verify_function.expect("verify function kept");
        assert!(verify(&EnvValue::Int(4)));
        assert!(!verify(&EnvValue::Int(3)));
        // A value of another shape is outside the predicate's domain
        assert!(verify(&EnvValue::Str("3".into())));
    }
}
