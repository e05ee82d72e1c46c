mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { pack_dir, output } => {
            commands::dump::handle(&pack_dir, output)?;
        }

        Commands::Bundle {
            dump_dir,
            output,
            version,
            pack_dir,
        } => {
            commands::bundle::handle(&dump_dir, output, version, pack_dir)?;
        }

        Commands::Run {
            pack_dir,
            output,
            version,
        } => {
            commands::run::handle(&pack_dir, output, version)?;
        }

        Commands::Configure { output_dir, show } => {
            commands::configure::handle(output_dir, show)?;
        }
    }

    Ok(())
}
