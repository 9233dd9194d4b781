use crate::commands::{check, docs, list, manifest, Commands};

impl Commands {
    pub fn execute(self) -> eyre::Result<()> {
        match self {
            Commands::Check { spec, env_file } => check::execute(&spec, env_file.as_deref()),
            Commands::Manifest {
                spec,
                output,
                name,
                namespace,
                api_version,
            } => manifest::execute(&spec, &output, &name, &namespace, &api_version),
            Commands::Docs { spec, output } => docs::execute(&spec, &output),
            Commands::List { spec } => list::execute(&spec),
        }
    }
}
