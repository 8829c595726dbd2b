//! `ledger-compat` binary — exit status is the contract.
//!
//!   0  every check passed
//!   1  a check failed
//!   2  hard error (unreadable or invalid policy)
//!
//! All tests use temporary directories for isolation.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use ledger_compat::config::POLICY_PATH_ENV;

fn write_policy(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("policy.json");
    fs::write(&path, content).expect("write policy file");
    path
}

/// Run `ledger-compat <args>` with the policy env var unset unless given.
fn run(args: &[&str], env_policy: Option<&Path>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ledger-compat"));
    cmd.args(args).env_remove(POLICY_PATH_ENV).env_remove("RUST_LOG");
    if let Some(path) = env_policy {
        cmd.env(POLICY_PATH_ENV, path);
    }
    cmd.output().expect("failed to run ledger-compat")
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("ledger-compat terminated by signal")
}

// ─────────────────────────────────────────────────────────────
// Exit 0: published policy
// ─────────────────────────────────────────────────────────────

#[test]
fn check_with_published_policy_exits_zero() {
    let output = run(&["check"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(exit_code(&output), 0, "stdout:\n{}", stdout);
    assert!(stdout.contains("Results: 3/3 passed"), "stdout:\n{}", stdout);
    assert!(!stdout.contains("[FAIL]"), "stdout:\n{}", stdout);
}

#[test]
fn versions_exits_zero() {
    let output = run(&["versions", "--json"], None);
    assert_eq!(exit_code(&output), 0);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("versions JSON");
    assert_eq!(doc["module_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(doc["driver_version"], ledger_driver::DRIVER_VERSION);
    assert_eq!(doc["core_library_version"], ledger_driver::CORE_LIBRARY_VERSION);
}

// ─────────────────────────────────────────────────────────────
// Exit 1: a check fails
// ─────────────────────────────────────────────────────────────

#[test]
fn check_with_policy_excluding_driver_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(
        &dir,
        r#"{"oldest_supported_driver":"0.2.0","supported_driver_lines":["0.2"]}"#,
    );
    let output = run(&["check", "--policy", path.to_str().unwrap()], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(exit_code(&output), 1, "stdout:\n{}", stdout);
    assert!(stdout.contains("[FAIL] driver_acceptability"), "stdout:\n{}", stdout);
}

#[test]
fn policy_from_env_var_is_used() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(
        &dir,
        r#"{"oldest_supported_driver":"0.2.0","supported_driver_lines":["0.2"]}"#,
    );
    let output = run(&["check", "--json"], Some(&path));
    assert_eq!(exit_code(&output), 1);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("report JSON");
    assert_eq!(report["driver_verdict"]["verdict"], "below_floor_and_unsupported_line");
}

// ─────────────────────────────────────────────────────────────
// Exit 2: hard errors
// ─────────────────────────────────────────────────────────────

#[test]
fn malformed_policy_from_env_var_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(&dir, "not json");
    let output = run(&["check"], Some(&path));
    assert_eq!(exit_code(&output), 2);

    // Each cause is printed once.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let cause = serde_json::from_str::<serde_json::Value>("not json")
        .unwrap_err()
        .to_string();
    assert_eq!(stderr.matches(cause.as_str()).count(), 1, "stderr:\n{}", stderr);
}

#[test]
fn missing_policy_file_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let output = run(&["check", "--policy", path.to_str().unwrap()], None);
    assert_eq!(exit_code(&output), 2);
}
