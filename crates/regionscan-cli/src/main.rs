//! RegionScan CLI - Command-line interface
//!
//! Runs region queries against the configured asset store and boundary
//! dataset.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;
mod storage;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async { commands::execute(cli).await });

    if let Err(error) = result {
        errors::from_anyhow(&error).display();
        std::process::exit(1);
    }

    Ok(())
}
