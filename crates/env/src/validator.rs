//! Constraint engine applied to every coerced value
//!
//! Checks run in a fixed order and the first failure ends the read:
//! required, min/max, enum, pattern, length, custom predicate. List values
//! are checked one constraint at a time across all elements, so an early
//! element failing `pattern` never hides a later element failing `min`.

use serde_json::Value;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use typenv_core::{ConfigEntry, ConstraintKind, Error, EnvValue, Result};

/// Validate `value` against the constraints frozen in `entry`
///
/// `raw_present` reports whether the environment held a non-empty raw value;
/// a required key fails without one even when a default was substituted,
/// and an optional key without one or a default is returned unchecked.
pub fn validate(
    entry: &ConfigEntry,
    value: Option<EnvValue>,
    raw_present: bool,
) -> Result<Option<EnvValue>> {
    let key = entry.key.as_str();
    let constraints = &entry.constraints;

    let value = match value {
        Some(EnvValue::Str(s)) if !constraints.disabled_trim => {
            Some(EnvValue::Str(s.trim().to_string()))
        }
        other => other,
    };

    let is_empty = value.as_ref().map_or(true, EnvValue::is_empty_str);
    if entry.is_required && (!raw_present || is_empty) {
        return Err(Error::required_missing(key));
    }

    let Some(value) = value else {
        return Ok(None);
    };
    // Unset optional keys without a usable default yield the empty value unchecked
    let has_default = entry
        .default_value
        .as_ref()
        .is_some_and(|default| mem::discriminant(default) == mem::discriminant(&value));
    let implicit = !raw_present && !has_default;
    if is_empty || implicit {
        return Ok(Some(value));
    }

    check_bounds(entry, &value)?;
    check_enum(entry, &value)?;
    check_pattern(entry, &value)?;
    check_length(entry, &value)?;
    check_custom(entry, &value)?;

    Ok(Some(value))
}

fn check_bounds(entry: &ConfigEntry, value: &EnvValue) -> Result<()> {
    let (min, max) = (entry.constraints.min, entry.constraints.max);
    if min.is_none() && max.is_none() {
        return Ok(());
    }

    let check = |n: i64, index: Option<usize>| -> Result<()> {
        if let Some(min) = min.filter(|min| n < *min) {
            return Err(violation(entry, ConstraintKind::Min, format!("min: {min}"), n, index));
        }
        if let Some(max) = max.filter(|max| n > *max) {
            return Err(violation(entry, ConstraintKind::Max, format!("max: {max}"), n, index));
        }
        Ok(())
    };

    match value {
        EnvValue::Int(n) => check(*n, None),
        EnvValue::Ints(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, n)| check(*n, Some(i))),
        _ => Ok(()),
    }
}

fn check_enum(entry: &ConfigEntry, value: &EnvValue) -> Result<()> {
    let allowed = &entry.constraints.enum_values;
    if allowed.is_empty() {
        return Ok(());
    }

    let label = || format!("enum: {}", Value::from(allowed.clone()));

    match value {
        EnvValue::Int(_) | EnvValue::Str(_) | EnvValue::Json(_) => {
            if allowed.contains(&value.to_json()) {
                Ok(())
            } else {
                Err(violation(entry, ConstraintKind::Enum, label(), value, None))
            }
        }
        EnvValue::Ints(items) => {
            match items.iter().position(|n| !allowed.contains(&Value::from(*n))) {
                Some(i) => Err(violation(entry, ConstraintKind::Enum, label(), items[i], Some(i))),
                None => Ok(()),
            }
        }
        EnvValue::Strs(items) => {
            match items
                .iter()
                .position(|s| !allowed.contains(&Value::String(s.clone())))
            {
                Some(i) => Err(violation(
                    entry,
                    ConstraintKind::Enum,
                    label(),
                    &items[i],
                    Some(i),
                )),
                None => Ok(()),
            }
        }
        EnvValue::Bool(_) => Ok(()),
    }
}

fn check_pattern(entry: &ConfigEntry, value: &EnvValue) -> Result<()> {
    let Some(pattern) = &entry.constraints.pattern else {
        return Ok(());
    };
    let label = || format!("pattern: {}", pattern.as_str());

    match value {
        EnvValue::Str(s) if !pattern.is_match(s) => {
            Err(violation(entry, ConstraintKind::Pattern, label(), s, None))
        }
        EnvValue::Strs(items) => match items.iter().position(|s| !pattern.is_match(s)) {
            Some(i) => Err(violation(
                entry,
                ConstraintKind::Pattern,
                label(),
                &items[i],
                Some(i),
            )),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

fn check_length(entry: &ConfigEntry, value: &EnvValue) -> Result<()> {
    let length = match value {
        EnvValue::Str(s) => s.chars().count(),
        other => match other.list_len() {
            Some(len) => len,
            None => return Ok(()),
        },
    };

    if let Some(min) = entry.constraints.min_length.filter(|min| length < *min) {
        return Err(Error::constraint_violation(
            &entry.key,
            ConstraintKind::Length,
            format!("minLength: {min}"),
            format!("length {length}"),
        ));
    }
    if let Some(max) = entry.constraints.max_length.filter(|max| length > *max) {
        return Err(Error::constraint_violation(
            &entry.key,
            ConstraintKind::Length,
            format!("maxLength: {max}"),
            format!("length {length}"),
        ));
    }
    Ok(())
}

fn check_custom(entry: &ConfigEntry, value: &EnvValue) -> Result<()> {
    let Some(verify) = &entry.verify_function else {
        return Ok(());
    };

    // A panicking predicate is reported the same way as one returning false
    let passed = panic::catch_unwind(AssertUnwindSafe(|| verify(value))).unwrap_or(false);
    if passed {
        Ok(())
    } else {
        Err(Error::custom_validation_failed(&entry.key, value))
    }
}

fn violation(
    entry: &ConfigEntry,
    kind: ConstraintKind,
    constraint: String,
    value: impl std::fmt::Display,
    index: Option<usize>,
) -> Error {
    match index {
        Some(i) => Error::element_violation(&entry.key, kind, constraint, value, i),
        None => Error::constraint_violation(&entry.key, kind, constraint, value),
    }
}
