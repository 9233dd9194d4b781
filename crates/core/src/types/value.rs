//! Dynamically typed configuration values and the bridge to concrete Rust types

use super::env_type::EnvType;
use serde_json::Value;
use std::fmt;

/// A coerced configuration value, one variant per [`EnvType`] shape
///
/// `EnvType::Strs` and `EnvType::Array` share the `Strs` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    Int(i64),
    Ints(Vec<i64>),
    Bool(bool),
    Str(String),
    Strs(Vec<String>),
    Json(Value),
}

impl EnvValue {
    /// JSON representation, used for enum membership and exporters
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            EnvValue::Int(n) => Value::from(*n),
            EnvValue::Ints(items) => Value::from(items.clone()),
            EnvValue::Bool(b) => Value::Bool(*b),
            EnvValue::Str(s) => Value::String(s.clone()),
            EnvValue::Strs(items) => Value::from(items.clone()),
            EnvValue::Json(value) => value.clone(),
        }
    }

    /// Interpret a JSON document as a value of `env_type`
    ///
    /// Returns `None` when the document does not have the expected shape.
    #[must_use]
    pub fn from_json(env_type: EnvType, value: &Value) -> Option<Self> {
        match env_type {
            EnvType::Int => value.as_i64().map(EnvValue::Int),
            EnvType::Ints => value
                .as_array()?
                .iter()
                .map(Value::as_i64)
                .collect::<Option<Vec<_>>>()
                .map(EnvValue::Ints),
            EnvType::Bool => value.as_bool().map(EnvValue::Bool),
            EnvType::Str => value.as_str().map(|s| EnvValue::Str(s.to_string())),
            EnvType::Strs | EnvType::Array => value
                .as_array()?
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(EnvValue::Strs),
            EnvType::Json => Some(EnvValue::Json(value.clone())),
        }
    }

    /// Whether the value is the empty string
    #[must_use]
    pub fn is_empty_str(&self) -> bool {
        matches!(self, EnvValue::Str(s) if s.is_empty())
    }

    /// Number of elements for list values
    #[must_use]
    pub fn list_len(&self) -> Option<usize> {
        match self {
            EnvValue::Ints(items) => Some(items.len()),
            EnvValue::Strs(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Int(n) => write!(f, "{n}"),
            EnvValue::Ints(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
            EnvValue::Bool(b) => write!(f, "{b}"),
            EnvValue::Str(s) => f.write_str(s),
            EnvValue::Strs(items) => f.write_str(&items.join(",")),
            EnvValue::Json(value) => write!(f, "{value}"),
        }
    }
}

/// Rust types that typed readers can hand back to callers
pub trait EnvValueType: Clone + Send + Sync + 'static {
    fn into_env_value(self) -> EnvValue;

    fn from_env_value(value: &EnvValue) -> Option<Self>;
}

impl EnvValueType for i64 {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Int(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl EnvValueType for Vec<i64> {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Ints(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Ints(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl EnvValueType for bool {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Bool(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl EnvValueType for String {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Str(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl EnvValueType for Vec<String> {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Strs(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Strs(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl EnvValueType for Value {
    fn into_env_value(self) -> EnvValue {
        EnvValue::Json(self)
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        match value {
            EnvValue::Json(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl EnvValueType for EnvValue {
    fn into_env_value(self) -> EnvValue {
        self
    }

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_respects_declared_shape() {
        assert_eq!(
            EnvValue::from_json(EnvType::Int, &json!(8080)),
            Some(EnvValue::Int(8080))
        );
        assert_eq!(EnvValue::from_json(EnvType::Int, &json!("8080")), None);
        assert_eq!(
            EnvValue::from_json(EnvType::Array, &json!(["a", "b"])),
            Some(EnvValue::Strs(vec!["a".into(), "b".into()]))
        );
        assert_eq!(EnvValue::from_json(EnvType::Ints, &json!([1, "x"])), None);
        assert_eq!(
            EnvValue::from_json(EnvType::Json, &json!({"a": 1})),
            Some(EnvValue::Json(json!({"a": 1})))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(EnvValue::Ints(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(EnvValue::Json(json!({"a": 1})).to_string(), r#"{"a":1}"#);
        assert_eq!(EnvValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_typed_bridge_rejects_other_shapes() {
        assert_eq!(i64::from_env_value(&EnvValue::Int(3)), Some(3));
        assert_eq!(i64::from_env_value(&EnvValue::Str("3".into())), None);
        assert_eq!(
            <Vec<String>>::from_env_value(&vec!["x".to_string()].into_env_value()),
            Some(vec!["x".to_string()])
        );
    }
}
