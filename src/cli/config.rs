use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use readywait::Config;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (file plus environment overrides)
    Show,

    /// Show where the configuration was loaded from
    Path,
}

pub fn cmd_config(args: ConfigArgs, config: &Config, path: &Path) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("# source: {}", path.display());
            print!("{}", serde_yaml::to_string(config)?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
