//! pgcatalog - pinned PostgreSQL image catalogs
//!
//! This is the main entry point for the pgcatalog command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);
    let out = output::Reporter::new(cli.quiet);

    match cli.command.unwrap_or_default() {
        Commands::Version(args) => commands::version::run(args),
        Commands::Generate => {
            let config = commands::load_config(cli.config.as_deref(), &cli.overrides)?;
            commands::generate::run(config, out).await
        }
        Commands::Plan(args) => {
            let config = commands::load_config(cli.config.as_deref(), &cli.overrides)?;
            commands::plan::run(args, config, out).await
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
