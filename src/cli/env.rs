use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::config::ConfigArgs;
use super::simulate::SimulateArgs;

#[derive(Parser, Debug)]
#[command(name = "readywait", version, about = "Element readiness waits for browser tests")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Shortcut for --log-level debug
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect configuration
    Config(ConfigArgs),

    /// Run the poller against a scripted target
    Simulate(SimulateArgs),
}
