use clap::Subcommand;
use std::path::{Path, PathBuf};
use typenv_core::{Result, DEFAULT_CONFIG_MAP_API_VERSION, TYPENV_SPEC_VAR};
use typenv_env::declaration::load_declarations;
use typenv_env::Catalogue;

pub mod check;
pub mod docs;
pub mod list;
pub mod manifest;

#[derive(Subcommand)]
pub enum Commands {
    /// Read every declared key from the environment and report failures
    Check {
        /// JSON declaration file
        #[arg(short, long, env = TYPENV_SPEC_VAR)]
        spec: PathBuf,

        /// Read values from a .env file instead of the process environment
        #[arg(long, value_name = "FILE")]
        env_file: Option<PathBuf>,
    },

    /// Write a Kubernetes ConfigMap with every declared default
    Manifest {
        /// JSON declaration file
        #[arg(short, long, env = TYPENV_SPEC_VAR)]
        spec: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// ConfigMap name
        #[arg(long)]
        name: String,

        /// ConfigMap namespace
        #[arg(long, default_value = "default")]
        namespace: String,

        /// ConfigMap apiVersion
        #[arg(long, default_value = DEFAULT_CONFIG_MAP_API_VERSION)]
        api_version: String,
    },

    /// Write a markdown reference of every declared key
    Docs {
        /// JSON declaration file
        #[arg(short, long, env = TYPENV_SPEC_VAR)]
        spec: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List declared keys sorted by name
    #[command(visible_alias = "ls")]
    List {
        /// JSON declaration file
        #[arg(short, long, env = TYPENV_SPEC_VAR)]
        spec: PathBuf,
    },
}

/// Declare every key of a declaration file without reading any value
pub(crate) fn declare_all(spec: &Path) -> Result<Catalogue> {
    let catalogue = Catalogue::new();
    for declaration in load_declarations(spec)? {
        let config = declaration.to_config()?;
        catalogue.register(config.to_entry(&declaration.key, declaration.env_type));
    }
    Ok(catalogue)
}
