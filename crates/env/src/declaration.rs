//! JSON declaration files describing configuration keys
//!
//! A declaration file is a JSON array such as:
//!
//! ```json
//! [
//!   { "key": "PORT", "type": "int", "defaultValue": 8080, "min": 1, "max": 65535 },
//!   { "key": "LOG_LEVEL", "type": "str", "enum": ["debug", "info"], "isRequired": true }
//! ]
//! ```
//!
//! Custom predicates cannot be expressed in JSON; everything else maps onto
//! [`EnvConfig`].

use crate::reader::Environment;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use typenv_core::{Constraints, EnvConfig, EnvType, EnvValue, Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Declaration {
    pub key: String,
    #[serde(rename = "type")]
    pub env_type: EnvType,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<Value>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub disabled_trim: bool,
}

impl Declaration {
    /// Build the dynamically typed config, checking the default and pattern
    pub fn to_config(&self) -> Result<EnvConfig<EnvValue>> {
        let default_value = match &self.default_value {
            None | Some(Value::Null) => None,
            Some(raw) => Some(EnvValue::from_json(self.env_type, raw).ok_or_else(|| {
                Error::invalid_declaration(
                    &self.key,
                    format!("default value {raw} is not a valid {}", self.env_type),
                )
            })?),
        };

        let pattern = self
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| Error::invalid_declaration(&self.key, format!("invalid pattern: {e}")))?;

        Ok(EnvConfig {
            default_value,
            description: self.description.clone(),
            is_required: self.is_required,
            constraints: Constraints {
                min: self.min,
                max: self.max,
                min_length: self.min_length,
                max_length: self.max_length,
                enum_values: self.enum_values.clone(),
                pattern,
                disabled_trim: self.disabled_trim,
            },
            verify_function: None,
        })
    }

    /// Register and read this key through `env`
    pub fn read(&self, env: &Environment) -> Result<Option<EnvValue>> {
        env.read(self.env_type, &self.key, &self.to_config()?)
    }
}

/// Parse a declaration document
pub fn parse_declarations(content: &str) -> Result<Vec<Declaration>> {
    Ok(serde_json::from_str(content)?)
}

/// Read and parse a declaration file
pub fn load_declarations(path: &Path) -> Result<Vec<Declaration>> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::file_system(path, "read declaration file", e))?;
    let declarations = parse_declarations(&content)?;
    tracing::debug!(path = %path.display(), count = declarations.len(), "loaded declarations");
    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapEnv;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DECLARATIONS: &str = r#"[
        { "key": "PORT", "type": "int", "defaultValue": 8080, "min": 1, "max": 65535,
          "description": "HTTP listen port" },
        { "key": "LOG_LEVEL", "type": "str", "enum": ["debug", "info"], "isRequired": true },
        { "key": "PEERS", "type": "array", "pattern": "^[a-z]+$" }
    ]"#;

    #[test]
    fn test_parse_declarations() {
        let declarations = parse_declarations(DECLARATIONS).unwrap();

        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0].env_type, EnvType::Int);
        assert_eq!(declarations[0].default_value, Some(json!(8080)));
        assert!(declarations[1].is_required);
        assert_eq!(declarations[1].enum_values, vec![json!("debug"), json!("info")]);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = parse_declarations(r#"[{ "key": "A", "type": "int", "minimum": 3 }]"#);
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[test]
    fn test_default_must_match_type() {
        let declaration: Declaration =
            serde_json::from_value(json!({ "key": "PORT", "type": "int", "defaultValue": "80" }))
                .unwrap();
        assert!(matches!(
            declaration.to_config(),
            Err(Error::InvalidDeclaration { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let declaration: Declaration =
            serde_json::from_value(json!({ "key": "NAME", "type": "str", "pattern": "(" }))
                .unwrap();
        assert!(matches!(
            declaration.to_config(),
            Err(Error::InvalidDeclaration { .. })
        ));
    }

    #[test]
    fn test_read_declarations() {
        let env = Environment::new(
            MapEnv::new()
                .with("LOG_LEVEL", "info")
                .with("PEERS_0", "alpha")
                .with("PEERS_1", "beta"),
        );

        let values: Vec<_> = parse_declarations(DECLARATIONS)
            .unwrap()
            .iter()
            .map(|d| d.read(&env).unwrap())
            .collect();

        assert_eq!(values[0], Some(EnvValue::Int(8080)));
        assert_eq!(values[1], Some(EnvValue::Str("info".into())));
        assert_eq!(
            values[2],
            Some(EnvValue::Strs(vec!["alpha".into(), "beta".into()]))
        );
        assert_eq!(env.catalogue().len(), 3);
    }

    #[test]
    fn test_load_declarations() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DECLARATIONS.as_bytes()).unwrap();

        let declarations = load_declarations(file.path()).unwrap();
        assert_eq!(declarations.len(), 3);

        let missing = load_declarations(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(Error::FileSystem { .. })));
    }
}
