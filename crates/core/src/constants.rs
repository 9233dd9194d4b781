/// Constants used throughout the typenv codebase
// Boolean coercion: uppercased raw values that read as `true`
pub const BOOL_TRUE_TOKENS: &[&str] = &["YES", "1", "TRUE", "ON", "Y", "V", "O", "T"];

// Uppercased raw values treated as "not set" by the boolean reader
pub const BOOL_UNSET_TOKENS: &[&str] = &["", "UNDEFINED", "NULL"];

// Delimiter for `strs` and `ints` raw values
pub const LIST_DELIMITER: char = ',';

// Indexed arrays probe `KEY_0`, `KEY_1`, ... starting here
pub const ARRAY_START_INDEX: usize = 0;

// Kubernetes ConfigMap defaults
pub const DEFAULT_CONFIG_MAP_API_VERSION: &str = "v1";
pub const CONFIG_MAP_KIND: &str = "ConfigMap";

// Markdown rendering
pub const REQUIRED_MARKER: &str = "✓";
pub const VALIDATION_SEPARATOR: &str = "<br>";

// Environment variable read by the CLI for the declaration file path
pub const TYPENV_SPEC_VAR: &str = "TYPENV_SPEC";
