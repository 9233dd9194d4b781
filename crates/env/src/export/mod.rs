//! Render the catalogue as deployment or documentation artifacts
//!
//! Both exporters are pure formatting over [`Catalogue::entries`], which is
//! sorted by key, and never fail on an empty catalogue. The `export_*`
//! variants write the rendered text atomically.
//!
//! [`Catalogue::entries`]: crate::Catalogue::entries

mod config_map;
mod markdown;

pub use config_map::{export_config_map, render_config_map};
pub use markdown::{export_markdown, render_markdown};
