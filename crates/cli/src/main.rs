use clap::Parser;

mod commands;
mod execute;

use commands::Commands;

#[derive(Parser)]
#[command(name = "typenv")]
#[command(about = "Validate, document and export typed environment configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    typenv_utils::tracing::init(cli.verbose)
        .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    cli.command.execute()
}
