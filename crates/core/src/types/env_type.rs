//! The closed set of coercion strategies a configuration key can declare

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coercion and validation strategy for one configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    /// Base-10 integer
    Int,
    /// Comma-separated integers
    Ints,
    /// Truthy/falsy token
    Bool,
    /// Plain string
    Str,
    /// Comma-separated strings
    Strs,
    /// Strings collected from `KEY_0`, `KEY_1`, ...
    Array,
    /// Any JSON document
    Json,
}

impl EnvType {
    pub const ALL: [EnvType; 7] = [
        EnvType::Int,
        EnvType::Ints,
        EnvType::Bool,
        EnvType::Str,
        EnvType::Strs,
        EnvType::Array,
        EnvType::Json,
    ];

    /// Short tag used in exported documentation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EnvType::Int => "int",
            EnvType::Ints => "ints",
            EnvType::Bool => "bool",
            EnvType::Str => "str",
            EnvType::Strs => "strs",
            EnvType::Array => "array",
            EnvType::Json => "json",
        }
    }

    /// Human-readable explanation of how the raw value is interpreted
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            EnvType::Int => "Integer number",
            EnvType::Ints => "Array of integers (comma-separated, e.g., `1,2,3`)",
            EnvType::Bool => {
                "Boolean value (`true`, `false`, `1`, `0`, `yes`, `no`, etc.)"
            }
            EnvType::Str => "String value",
            EnvType::Strs => "Array of strings (comma-separated)",
            EnvType::Array => {
                "Array from indexed environment variables (e.g., `KEY_0`, `KEY_1`, etc.)"
            }
            EnvType::Json => "JSON value",
        }
    }
}

impl fmt::Display for EnvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EnvType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::configuration(format!("unknown environment type '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_from_str() {
        for env_type in EnvType::ALL {
            assert_eq!(env_type.as_str().parse::<EnvType>().unwrap(), env_type);
        }
        assert!("float".parse::<EnvType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let parsed: EnvType = serde_json::from_str("\"strs\"").unwrap();
        assert_eq!(parsed, EnvType::Strs);
        assert_eq!(serde_json::to_string(&EnvType::Array).unwrap(), "\"array\"");
    }
}
