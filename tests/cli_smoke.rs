use assert_cmd::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn readywait(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("readywait").expect("binary built");
    cmd.env_remove("READYWAIT_POLL_INTERVAL_MS")
        .env_remove("READYWAIT_DEFAULT_TIMEOUT_MS")
        .env("RUST_LOG", "warn")
        .arg("--config")
        .arg(config_dir.path().join("readywait.yaml"));
    cmd
}

#[test]
fn simulate_prints_report_for_ready_target() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir)
        .args([
            "simulate",
            "--target",
            "#login",
            "--visible-after-ms",
            "20",
            "--enabled-after-ms",
            "60",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let report: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(report["target"].as_str(), Some("#login"));
    assert_eq!(report["state"]["visible"].as_bool(), Some(true));
    assert_eq!(report["state"]["enabled"].as_bool(), Some(true));
    assert!(report["elapsed_ms"].as_u64().unwrap() >= 60);
}

#[test]
fn simulate_fails_when_target_stays_disabled() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir)
        .args([
            "simulate",
            "--target",
            "#pay",
            "--never-enabled",
            "--timeout-ms",
            "300",
        ])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("Wait timeout"));
    assert!(stderr.contains("#pay"));
}

#[test]
fn simulate_rejects_negative_timeout() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir)
        .args(["simulate", "--timeout-ms", "-5"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("Configuration error"));
}

#[test]
fn config_show_reflects_file_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("readywait.yaml"),
        "poller:\n  poll_interval_ms: 40\n",
    )
    .unwrap();

    let assert = readywait(&dir).args(["config", "show"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    assert!(stdout.contains("poll_interval_ms: 40"));
    assert!(stdout.contains("default_timeout_ms: 10000"));
}

#[test]
fn simulate_missing_target_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir)
        .args(["simulate", "--target", "#ghost", "--missing", "--timeout-ms", "200"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("Wait timeout"));
    assert!(stderr.contains("target not found"));
}

#[test]
fn config_path_prints_resolved_file() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir).args(["config", "path"]).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let expected = dir.path().join("readywait.yaml");
    assert_eq!(stdout.trim(), expected.display().to_string());
}

#[test]
fn debug_flag_keeps_report_on_stdout() {
    let dir = TempDir::new().unwrap();
    let assert = readywait(&dir)
        .env_remove("RUST_LOG")
        .args(["--debug", "simulate", "--target", "#ok"])
        .assert()
        .success();

    let output = assert.get_output();
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8 output");
    let report: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(report["polls"].as_u64(), Some(1));

    let stderr = String::from_utf8(output.stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("DEBUG"));
}
