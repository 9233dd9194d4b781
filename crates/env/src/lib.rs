//! Typed environment configuration for typenv
//!
//! This crate reads raw environment values, coerces them into typed values,
//! validates them against declared constraints and records every declared
//! key in a [`Catalogue`] that the exporters turn into a ConfigMap or a
//! markdown reference.

pub mod catalogue;
pub mod coerce;
pub mod declaration;
pub mod export;
pub mod provider;
pub mod reader;
pub mod source;
pub mod validator;

pub use catalogue::Catalogue;
pub use declaration::Declaration;
pub use export::{export_config_map, export_markdown, render_config_map, render_markdown};
pub use provider::Provider;
pub use reader::Environment;
pub use source::{EnvSource, MapEnv, ProcessEnv};
