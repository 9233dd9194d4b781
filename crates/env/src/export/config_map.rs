//! Kubernetes ConfigMap rendering of the catalogue
//!
//! ConfigMap `data` values must be strings, so every default is quoted:
//! `8080` is written as `"8080"` and `["a"]` as `"[\"a\"]"`, not as the bare
//! JSON literal. Keys without a default are written as `""`.

use crate::catalogue::Catalogue;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;
use typenv_core::{EnvValue, Result, CONFIG_MAP_KIND};
use typenv_utils::write_atomic_string;

/// Kubernetes ConfigMap listing every declared key with its default
///
/// Each default is written as a JSON string so the document is valid YAML
/// and valid ConfigMap data whatever the key's type.
#[must_use]
pub fn render_config_map(
    catalogue: &Catalogue,
    name: &str,
    namespace: &str,
    api_version: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "apiVersion: {api_version}");
    let _ = writeln!(out, "kind: {CONFIG_MAP_KIND}");
    let _ = writeln!(out, "metadata:");
    let _ = writeln!(out, "  name: {name}");
    let _ = writeln!(out, "  namespace: {namespace}");

    let entries = catalogue.entries();
    if entries.is_empty() {
        out.push_str("data: {}\n");
        return out;
    }

    out.push_str("data:\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {}: {}",
            entry.key,
            encode_default(entry.default_value.as_ref())
        );
    }
    out
}

/// Render and write the ConfigMap to `path`
pub fn export_config_map(
    catalogue: &Catalogue,
    path: &Path,
    name: &str,
    namespace: &str,
    api_version: &str,
) -> Result<()> {
    let content = render_config_map(catalogue, name, namespace, api_version);
    write_atomic_string(path, &content)?;
    tracing::debug!(path = %path.display(), entries = catalogue.len(), "exported config map");
    Ok(())
}

fn encode_default(value: Option<&EnvValue>) -> String {
    let text = match value {
        None => String::new(),
        Some(EnvValue::Str(s)) => s.clone(),
        Some(EnvValue::Json(Value::String(s))) => s.clone(),
        Some(other) => other.to_json().to_string(),
    };
    Value::String(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use typenv_core::{ConfigEntry, EnvType};

    fn entry(key: &str, env_type: EnvType, default: Option<EnvValue>) -> ConfigEntry {
        let mut entry = ConfigEntry::new(key, env_type);
        entry.default_value = default;
        entry
    }

    #[test]
    fn test_render_sorted_with_encoded_defaults() {
        let catalogue = Catalogue::new();
        catalogue.register(entry("PORT", EnvType::Int, Some(EnvValue::Int(8080))));
        catalogue.register(entry("HOST", EnvType::Str, Some(EnvValue::Str("0.0.0.0".into()))));
        catalogue.register(entry("TOKEN", EnvType::Str, None));
        catalogue.register(entry(
            "TAGS",
            EnvType::Strs,
            Some(EnvValue::Strs(vec!["a".into(), "b".into()])),
        ));
        catalogue.register(entry("META", EnvType::Json, Some(EnvValue::Json(json!({"x": 1})))));

        let rendered = render_config_map(&catalogue, "app-config", "prod", "v1");

        let expected = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: app-config
  namespace: prod
data:
  HOST: "0.0.0.0"
  META: "{\"x\":1}"
  PORT: "8080"
  TAGS: "[\"a\",\"b\"]"
  TOKEN: ""
"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_catalogue() {
        let rendered = render_config_map(&Catalogue::new(), "empty", "default", "v1");
        assert!(rendered.ends_with("data: {}\n"));
        assert!(rendered.starts_with("apiVersion: v1\nkind: ConfigMap\n"));
    }

    #[test]
    fn test_export_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("configmap.yaml");
        let catalogue = Catalogue::new();
        catalogue.register(entry("DEBUG", EnvType::Bool, Some(EnvValue::Bool(false))));

        export_config_map(&catalogue, &path, "app", "ns", "v1").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("  DEBUG: \"false\"\n"));
    }
}
