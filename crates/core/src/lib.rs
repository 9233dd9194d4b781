//! Core domain types, errors, and constants for `typenv`.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   including the validation failures raised by typed reads.
//! - **`types`**: `EnvType`, the dynamically typed `EnvValue`, the caller-facing
//!   `EnvConfig<T>` builder and the frozen `ConfigEntry` stored in a catalogue.
//! - **`constants`**: Coercion tokens and exporter defaults shared by the
//!   other crates.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{ConstraintKind, Error, Result},
    types::*,
};
