//! Shared utilities for typenv
//!
//! File output used by the exporters and the tracing setup used by the
//! binary. Nothing in here knows about configuration keys.

pub mod atomic_file;
pub mod tracing;

pub use atomic_file::*;
