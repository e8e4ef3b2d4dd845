//! Configuration loading
//!
//! Resolution order for the file: explicit path, then
//! `./config/readywait.yaml`, then `<config dir>/readywait/config.yaml`.
//! A missing file yields defaults. Environment variables override the file.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};
use wait_primitives::PollerConfig;

pub const ENV_POLL_INTERVAL_MS: &str = "READYWAIT_POLL_INTERVAL_MS";
pub const ENV_DEFAULT_TIMEOUT_MS: &str = "READYWAIT_DEFAULT_TIMEOUT_MS";

const LOCAL_CONFIG: &str = "config/readywait.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poller: PollerConfig,
}

impl Config {
    /// Apply `READYWAIT_*` environment overrides in place
    pub fn apply_env_overrides(&mut self) {
        if let Some(val) = read_env_u64(ENV_POLL_INTERVAL_MS) {
            self.poller.poll_interval_ms = val;
        }
        if let Some(val) = read_env_u64(ENV_DEFAULT_TIMEOUT_MS) {
            self.poller.default_timeout_ms = val;
        }
    }
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

/// Default location when no path is given on the command line
pub fn default_config_path() -> Result<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Ok(local);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("readywait");
    path.push("config.yaml");
    Ok(path)
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let path = match config_path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    let mut config = read_config_file(&path).await?;
    config.apply_env_overrides();
    config
        .poller
        .validate()
        .with_context(|| format!("Invalid poller settings (from {})", path.display()))?;

    Ok(LoadedConfig { config, path })
}

async fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found; using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

fn read_env_u64(name: &str) -> Option<u64> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(?err, env = name, value = raw, "invalid u64 env override");
                None
            }
        },
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!(?err, env = name, "failed to read env override");
            None
        }
    }
}
