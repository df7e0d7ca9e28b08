//! Integration tests for the `tf` binary.
//!
//! The TUI itself needs a terminal, so these only exercise the paths that
//! exit before raw mode: flag parsing and startup failures.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `tf` binary.
fn tf_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tf");
    path
}

#[test]
fn version_flag_prints_version() {
    let output = Command::new(tf_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_flag_mentions_data_dir() {
    let output = Command::new(tf_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--data-dir"));
}

#[test]
fn corrupt_store_is_reported_on_stderr() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("storage.json"),
        r#"{ "tasks": "not a list" }"#,
    )
    .unwrap();

    let output = Command::new(tf_bin())
        .arg("-C")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("corrupt"));
}

#[test]
fn second_instance_is_refused() {
    let dir = TempDir::new().unwrap();
    let _held = taskflow::io::lock::DirLock::acquire_default(dir.path()).unwrap();

    let output = Command::new(tf_bin())
        .arg("-C")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("in use"));
}

#[test]
fn malformed_config_is_a_startup_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "ui = \"not a table\"").unwrap();

    let output = Command::new(tf_bin())
        .arg("-C")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}
