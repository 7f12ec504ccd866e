//! CLI integration tests for Veille
//!
//! These tests drive the binary end to end: validation messages, the
//! submission cycle, output formats and configuration.

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a command instance for the veille binary
fn veille_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("veille"))
}

/// Write a config with a short backend delay and return its path
fn fast_config(dir: &TempDir, extra: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, format!("[submission]\ndelay_ms = 10\n{}", extra)).unwrap();
    path
}

/// Command pinned to 2024-06-01 with a fast config
fn pinned_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = veille_cmd();
    cmd.env_remove("VEILLE_CONFIG")
        .arg("--config")
        .arg(config)
        .args(["--today", "2024-06-01"]);
    cmd
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_check_accepts_past_range() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["check", "--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date range accepted (31 days)."));
}

#[test]
fn test_check_rejects_reversed_range() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["check", "--start", "2024-01-10", "--end", "2024-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start date must be before end date."));
}

#[test]
fn test_check_rejects_missing_date() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["check", "--end", "2024-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Select both dates."));

    // An empty value counts as not selected
    pinned_cmd(&config)
        .args(["check", "--start", "", "--end", "2024-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Select both dates."));
}

#[test]
fn test_check_rejects_future_start() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["check", "--start", "2999-01-01", "--end", "2999-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start date cannot be in the future."));
}

#[test]
fn test_check_json_reports_outcome() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    let output = pinned_cmd(&config)
        .args(["check", "--start", "2024-01-10", "--end", "2024-01-05", "--format", "json"])
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "start_after_end");
    assert_eq!(json["message"], "Start date must be before end date.");
    assert_eq!(json["range"]["start"], "2024-01-10");
}

#[test]
fn test_malformed_date_is_input_error() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["check", "--start", "2024-02-30", "--end", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '2024-02-30'"));
}

#[test]
fn test_max_range_from_config() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "[validation]\nmax_range_days = 7\n");

    pinned_cmd(&config)
        .args(["summary", "--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Date range cannot exceed 7 days."));
}

// =============================================================================
// Submission Tests
// =============================================================================

#[test]
fn test_summary_completes() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["summary", "--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary generated successfully."));
}

#[test]
fn test_summary_json_includes_request_and_state() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    let output = pinned_cmd(&config)
        .args(["summary", "--start", "2024-01-01", "--end", "2024-01-31", "-f", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["request"]["kind"], "custom");
    assert_eq!(json["request"]["window_days"], 31);
    assert_eq!(json["state"]["state"], "completed");
    assert_eq!(json["state"]["message"], "Summary generated successfully.");
}

#[test]
fn test_rejected_summary_prints_nothing_on_stdout() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["summary", "--start", "2024-01-10", "--end", "2024-01-05"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Start date must be before end date."));
}

#[test]
fn test_rejected_summary_json_matches_check() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");
    let dates = ["--start", "2999-01-01", "--end", "2999-01-02", "--format", "json"];

    let parse = |cmd: &str| -> serde_json::Value {
        let output = pinned_cmd(&config)
            .arg(cmd)
            .args(dates)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Start date cannot be in the future."));
        serde_json::from_slice(&output.get_output().stdout).unwrap()
    };

    let summary = parse("summary");
    assert_eq!(summary["outcome"], "start_in_future");
    assert_eq!(summary["message"], "Start date cannot be in the future.");
    assert_eq!(summary, parse("check"));
}

#[test]
fn test_daily_uses_pinned_date() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    let output = pinned_cmd(&config)
        .args(["daily", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["request"]["kind"], "daily");
    assert_eq!(json["request"]["range"]["start"], "2024-05-31");
    assert_eq!(json["request"]["range"]["end"], "2024-06-01");
    assert_eq!(json["request"]["window_days"], 1);
}

#[test]
fn test_flash_completes() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .arg("flash")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary generated successfully."));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "");

    pinned_cmd(&config)
        .args(["--verbose", "flash"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:submit] Generating flash summary"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_default_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "default_format = \"json\"\n[submission]\ndelay_ms = 10\n").unwrap();

    let output = pinned_cmd(&path).arg("flash").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["request"]["kind"], "flash");
}

#[test]
fn test_config_from_env() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "[validation]\nmax_range_days = 3\n");

    veille_cmd()
        .env("VEILLE_CONFIG", &config)
        .args(["--today", "2024-06-01", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_range_days = 3"))
        .stdout(predicate::str::contains("delay_ms = 10"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    veille_cmd()
        .env_remove("VEILLE_CONFIG")
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("flash")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(&dir, "[validation]\nmax_range_days = 0\n");

    pinned_cmd(&config)
        .arg("flash")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_range_days must be at least 1"));
}
