use crate::catalogue::Catalogue;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;
use typenv_core::{
    ConfigEntry, EnvType, EnvValue, Result, REQUIRED_MARKER, VALIDATION_SEPARATOR,
};
use typenv_utils::write_atomic_string;

/// Markdown reference with one table row per declared key
#[must_use]
pub fn render_markdown(catalogue: &Catalogue) -> String {
    let mut out = String::from("# Environment Variables\n\n");
    out.push_str("| Name | Type | Required | Default | Description | Validation |\n");
    out.push_str("| :--- | :--: | :------: | :------ | :---------- | :--------- |\n");

    for entry in catalogue.entries() {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            entry.key,
            entry.env_type,
            if entry.is_required { REQUIRED_MARKER } else { "" },
            format_default(entry.default_value.as_ref()),
            escape_cell(entry.description.as_deref().unwrap_or_default()),
            format_validation(&entry),
        );
    }

    out.push_str("\n## Type Descriptions\n\n");
    for env_type in EnvType::ALL {
        let _ = writeln!(out, "- **{}**: {}", env_type, env_type.description());
    }

    out.push_str("\n## Notes\n\n");
    let _ = writeln!(
        out,
        "- **Required** ({REQUIRED_MARKER}): This environment variable must be set"
    );
    out.push_str("- **Default**: The value used when the environment variable is not set\n");
    out.push_str("- **Validation**: Additional constraints that the value must satisfy\n");
    out
}

/// Render and write the markdown reference to `path`
pub fn export_markdown(catalogue: &Catalogue, path: &Path) -> Result<()> {
    write_atomic_string(path, &render_markdown(catalogue))?;
    tracing::debug!(path = %path.display(), entries = catalogue.len(), "exported markdown");
    Ok(())
}

fn format_default(value: Option<&EnvValue>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };

    let text = match value {
        EnvValue::Ints(items) if items.is_empty() => return "`[]`".to_string(),
        EnvValue::Strs(items) if items.is_empty() => return "`[]`".to_string(),
        EnvValue::Json(Value::Array(items)) if items.is_empty() => return "`[]`".to_string(),
        EnvValue::Str(s) if s.is_empty() => return "`\"\"`".to_string(),
        EnvValue::Ints(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        EnvValue::Strs(items) => items.join(", "),
        EnvValue::Json(Value::Array(items)) => items
            .iter()
            .map(json_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => json_text(&other.to_json()),
    };
    format!("`{}`", escape_cell(&text))
}

fn format_validation(entry: &ConfigEntry) -> String {
    let c = &entry.constraints;
    let mut rules = Vec::new();

    if let Some(min) = c.min {
        rules.push(format!("min: {min}"));
    }
    if let Some(max) = c.max {
        rules.push(format!("max: {max}"));
    }
    if let Some(min_length) = c.min_length {
        rules.push(format!("minLength: {min_length}"));
    }
    if let Some(max_length) = c.max_length {
        rules.push(format!("maxLength: {max_length}"));
    }
    if !c.enum_values.is_empty() {
        let members: Vec<String> = c
            .enum_values
            .iter()
            .map(|v| format!("`{}`", escape_cell(&json_text(v))))
            .collect();
        rules.push(format!("enum: {}", members.join(", ")));
    }
    if let Some(pattern) = &c.pattern {
        rules.push(format!("pattern: `{}`", escape_cell(pattern.as_str())));
    }
    if entry.has_custom_validation() {
        rules.push("custom validation".to_string());
    }
    if c.disabled_trim {
        rules.push("no trim".to_string());
    }

    if rules.is_empty() {
        "-".to_string()
    } else {
        rules.join(VALIDATION_SEPARATOR)
    }
}

/// Strings render bare, everything else as compact JSON
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
