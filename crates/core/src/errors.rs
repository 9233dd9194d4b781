use std::fmt;
use std::path::PathBuf;

/// Result type alias for typenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// The constraint family a value violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Min,
    Max,
    Enum,
    Pattern,
    Length,
}

impl ConstraintKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::Min => "min",
            ConstraintKind::Max => "max",
            ConstraintKind::Enum => "enum",
            ConstraintKind::Pattern => "pattern",
            ConstraintKind::Length => "length",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for typenv operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required variable was absent or empty
    #[error("environment variable '{key}' is required but was not set")]
    RequiredMissing { key: String },

    /// A declarative constraint rejected the value
    #[error("{}", format_constraint_violation(.key, .constraint, .value, .index))]
    ConstraintViolation {
        key: String,
        kind: ConstraintKind,
        constraint: String,
        value: String,
        index: Option<usize>,
    },

    /// The custom verify function returned false or panicked
    #[error("environment variable '{key}' failed custom validation: {value}")]
    CustomValidationFailed { key: String, value: String },

    /// A declaration could not be turned into a config entry
    #[error("invalid declaration for '{key}': {message}")]
    InvalidDeclaration { key: String, message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_constraint_violation(
    key: &str,
    constraint: &str,
    value: &str,
    index: &Option<usize>,
) -> String {
    match index {
        Some(i) => format!(
            "environment variable '{key}' violates \"{constraint}\": {value} at index {i}"
        ),
        None => format!("environment variable '{key}' violates \"{constraint}\": {value}"),
    }
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a required-variable error
    #[must_use]
    pub fn required_missing(key: impl Into<String>) -> Self {
        Error::RequiredMissing { key: key.into() }
    }

    /// Create a constraint violation for a scalar value
    #[must_use]
    pub fn constraint_violation(
        key: impl Into<String>,
        kind: ConstraintKind,
        constraint: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Error::ConstraintViolation {
            key: key.into(),
            kind,
            constraint: constraint.into(),
            value: value.to_string(),
            index: None,
        }
    }

    /// Create a constraint violation for one element of a list value
    #[must_use]
    pub fn element_violation(
        key: impl Into<String>,
        kind: ConstraintKind,
        constraint: impl Into<String>,
        value: impl fmt::Display,
        index: usize,
    ) -> Self {
        Error::ConstraintViolation {
            key: key.into(),
            kind,
            constraint: constraint.into(),
            value: value.to_string(),
            index: Some(index),
        }
    }

    /// Create a custom validation failure
    #[must_use]
    pub fn custom_validation_failed(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Error::CustomValidationFailed {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Create an invalid declaration error
    #[must_use]
    pub fn invalid_declaration(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidDeclaration {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Whether this error came out of the read-and-validate pipeline
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::RequiredMissing { .. }
                | Error::ConstraintViolation { .. }
                | Error::CustomValidationFailed { .. }
        )
    }

    /// The configuration key this error refers to, if any
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::RequiredMissing { key }
            | Error::ConstraintViolation { key, .. }
            | Error::CustomValidationFailed { key, .. }
            | Error::InvalidDeclaration { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_display() {
        let err = Error::constraint_violation("PORT", ConstraintKind::Min, "min: 2", 1);
        assert_eq!(
            err.to_string(),
            "environment variable 'PORT' violates \"min: 2\": 1"
        );

        let err = Error::element_violation("PORTS", ConstraintKind::Max, "max: 10", 11, 3);
        assert_eq!(
            err.to_string(),
            "environment variable 'PORTS' violates \"max: 10\": 11 at index 3"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::required_missing("A").is_validation());
        assert!(Error::custom_validation_failed("A", "x").is_validation());
        assert!(!Error::configuration("boom").is_validation());
        assert_eq!(Error::required_missing("A").key(), Some("A"));
        assert_eq!(Error::configuration("boom").key(), None);
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
