//! Command implementations

mod config;
mod doctor;
mod region;
mod search;
mod sector;

use crate::cli::{Cli, Commands};
use crate::config_loader;
use crate::output::OutputWriter;
use crate::storage::Storage;
use anyhow::Result;
use regionscan_core::models::Granularity;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = config_loader::load_config(cli.config.as_deref(), cli.overrides())?;

    // These two report on storage rather than query it
    let storage = match &cli.command {
        Commands::Config => return config::execute(&config, &output),
        Commands::Doctor(args) => return doctor::execute(args, &config, cli.storage, &output).await,
        _ => Storage::new(cli.storage, &config, cli.fixture.as_deref()).await?,
    };

    match cli.command {
        Commands::Country(args) => {
            region::execute(Granularity::Country, args, &config, &storage, &output, cli.explain).await
        }
        Commands::State(args) => {
            region::execute(Granularity::State, args, &config, &storage, &output, cli.explain).await
        }
        Commands::City(args) => {
            region::execute(Granularity::City, args, &config, &storage, &output, cli.explain).await
        }
        Commands::Search(args) => search::execute(args, &storage, &output).await,
        Commands::Sector(args) => sector::execute(args, &storage, &output).await,
        Commands::Config | Commands::Doctor(_) => Ok(()),
    }
}
