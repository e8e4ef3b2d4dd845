use anyhow::Result;
use clap::Parser;
use readywait::{load_config, LoadedConfig};
use tracing::{error, info};

use super::config::cmd_config;
use super::env::{CliArgs, Commands};
use super::runtime::init_logging;
use super::simulate::cmd_simulate;

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    init_logging(&cli.log_level, cli.debug)?;
    info!("Starting readywait v{}", env!("CARGO_PKG_VERSION"));

    let LoadedConfig { config, path } = load_config(cli.config.as_ref()).await?;

    let result = match cli.command {
        Commands::Config(args) => cmd_config(args, &config, &path),
        Commands::Simulate(args) => cmd_simulate(args, &config).await,
    };

    match result {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(err) => {
            error!("Command failed: {}", err);
            Err(err)
        }
    }
}
