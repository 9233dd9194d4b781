//! Domain types for declaring, storing and returning configuration values

mod config;
mod entry;
mod env_type;
mod value;

pub use config::{Constraints, EnvConfig};
pub use entry::{ConfigEntry, VerifyFn};
pub use env_type::EnvType;
pub use value::{EnvValue, EnvValueType};
