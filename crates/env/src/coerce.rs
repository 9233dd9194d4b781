//! Raw string to typed value conversion, one function per [`EnvType`]
//!
//! Coercion never fails. Values that cannot be converted fall back to the
//! declared default, and list elements that cannot be converted are dropped.
//!
//! [`EnvType`]: typenv_core::EnvType

use crate::source::EnvSource;
use serde_json::Value;
use typenv_core::{ARRAY_START_INDEX, BOOL_TRUE_TOKENS, BOOL_UNSET_TOKENS, LIST_DELIMITER};

/// Parse a base-10 integer, ignoring surrounding whitespace
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[must_use]
pub fn coerce_int(raw: Option<&str>, default: Option<i64>) -> Option<i64> {
    raw.and_then(parse_int).or(default)
}

/// Empty raw values fall back to the default, then to `""`
#[must_use]
pub fn coerce_str(raw: Option<&str>, default: Option<&str>) -> String {
    match raw {
        Some(raw) if !raw.is_empty() => raw.to_string(),
        _ => default.unwrap_or_default().to_string(),
    }
}

/// Case-insensitive truthy tokens; unset-like tokens fall back to the default
#[must_use]
pub fn coerce_bool(raw: Option<&str>, default: Option<bool>) -> bool {
    let token = raw.unwrap_or_default().trim().to_uppercase();
    if BOOL_UNSET_TOKENS.contains(&token.as_str()) {
        return default.unwrap_or(false);
    }
    BOOL_TRUE_TOKENS.contains(&token.as_str())
}

#[must_use]
pub fn coerce_json(raw: Option<&str>, default: Option<Value>) -> Option<Value> {
    raw.and_then(|raw| serde_json::from_str(raw).ok()).or(default)
}

/// Split a list value into untrimmed tokens
///
/// A JSON array is flattened to its elements first, so `["a","b"]` and
/// `a,b` produce the same tokens.
#[must_use]
pub fn list_tokens(raw: &str) -> Vec<String> {
    let joined = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(&LIST_DELIMITER.to_string()),
        Err(_) => raw.to_string(),
    };

    joined.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// `a,b,c,,d,5` becomes `["a", "b", "c", "d", "5"]`
#[must_use]
pub fn coerce_strs(raw: Option<&str>, default: Option<Vec<String>>) -> Vec<String> {
    match raw.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => list_tokens(raw)
            .iter()
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        None => default.unwrap_or_default(),
    }
}

/// `1,2,3,a,,5` becomes `[1, 2, 3, 5]`
#[must_use]
pub fn coerce_ints(raw: Option<&str>, default: Option<Vec<i64>>) -> Vec<i64> {
    match raw.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => list_tokens(raw)
            .iter()
            .filter_map(|token| parse_int(token))
            .collect(),
        None => default.unwrap_or_default(),
    }
}

/// Collect `KEY_0`, `KEY_1`, ... until the first missing index
///
/// Index 0 is optional: when `KEY_0` is unset probing continues at `KEY_1`.
/// Any later gap ends the collection.
pub fn collect_indexed(source: &dyn EnvSource, key: &str, trim: bool) -> Vec<String> {
    let mut values = Vec::new();
    let mut index = ARRAY_START_INDEX;

    loop {
        let raw = source.var(&format!("{key}_{index}")).unwrap_or_default();
        let value = if trim { raw.trim().to_string() } else { raw };

        if value.is_empty() {
            if index > ARRAY_START_INDEX {
                break;
            }
        } else {
            values.push(value);
        }
        index += 1;
    }

    values
}

#[must_use]
pub fn coerce_array(found: Vec<String>, default: Option<Vec<String>>) -> Vec<String> {
    if found.is_empty() {
        default.unwrap_or_default()
    } else {
        found
    }
}
