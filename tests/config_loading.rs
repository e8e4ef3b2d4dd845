use std::fs;
use std::path::PathBuf;

use readywait::config::{ENV_DEFAULT_TIMEOUT_MS, ENV_POLL_INTERVAL_MS};
use readywait::{load_config, Config, PollerConfig};
use serial_test::serial;
use tempfile::tempdir;

fn clear_env() {
    std::env::remove_var(ENV_POLL_INTERVAL_MS);
    std::env::remove_var(ENV_DEFAULT_TIMEOUT_MS);
}

#[tokio::test]
#[serial]
async fn missing_file_yields_defaults() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let loaded = load_config(Some(&path)).await.unwrap();
    assert_eq!(loaded.config, Config::default());
    assert_eq!(loaded.path, path);
}

#[tokio::test]
#[serial]
async fn file_values_are_loaded() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("readywait.yaml");
    fs::write(
        &path,
        "poller:\n  poll_interval_ms: 50\n  default_timeout_ms: 2500\n",
    )
    .unwrap();

    let loaded = load_config(Some(&path)).await.unwrap();
    assert_eq!(
        loaded.config.poller,
        PollerConfig {
            poll_interval_ms: 50,
            default_timeout_ms: 2500,
        }
    );
}

#[tokio::test]
#[serial]
async fn partial_file_keeps_remaining_defaults() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("readywait.yaml");
    fs::write(&path, "poller:\n  poll_interval_ms: 25\n").unwrap();

    let loaded = load_config(Some(&path)).await.unwrap();
    assert_eq!(loaded.config.poller.poll_interval_ms, 25);
    assert_eq!(loaded.config.poller.default_timeout_ms, 10_000);
}

#[tokio::test]
#[serial]
async fn env_overrides_file() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("readywait.yaml");
    fs::write(&path, "poller:\n  poll_interval_ms: 50\n").unwrap();

    std::env::set_var(ENV_POLL_INTERVAL_MS, "20");
    std::env::set_var(ENV_DEFAULT_TIMEOUT_MS, "not-a-number");
    let loaded = load_config(Some(&path)).await;
    clear_env();

    let loaded = loaded.unwrap();
    assert_eq!(loaded.config.poller.poll_interval_ms, 20);
    assert_eq!(loaded.config.poller.default_timeout_ms, 10_000);
}

#[tokio::test]
#[serial]
async fn zero_interval_is_rejected() {
    clear_env();
    let dir = tempdir().unwrap();
    let path: PathBuf = dir.path().join("readywait.yaml");
    fs::write(&path, "poller:\n  poll_interval_ms: 0\n").unwrap();

    let err = load_config(Some(&path)).await.err().expect("invalid config");
    assert!(format!("{err:#}").contains("poll interval must be positive"));
}

#[tokio::test]
#[serial]
async fn malformed_yaml_is_an_error() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("readywait.yaml");
    fs::write(&path, "poller: [not, a, map]\n").unwrap();

    assert!(load_config(Some(&path)).await.is_err());
}
