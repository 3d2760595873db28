//! Integration tests for the rfut binary.
//!
//! Each run points HOME and XDG_CONFIG_HOME at a temp dir so a real global
//! config file cannot leak into the results.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn rfut(home: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_rfut");
    let mut command = Command::new(bin);
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RESULT_FUTURE_LOG")
        .arg("--quiet")
        .args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "rfut should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_task_command_output() {
    let home = TempDir::new().unwrap();
    let output = rfut(
        &home,
        &["task", "--count", "4", "--delay-ms", "1", "--fail-every", "2"],
        &[],
    );
    assert_eq!(
        stdout(&output),
        "task 0: ok 0\ntask 1: failed: task 1 failed on purpose\ntask 2: ok 20\ntask 3: failed: task 3 failed on purpose"
    );
}

#[test]
fn test_latch_command_output() {
    let home = TempDir::new().unwrap();
    let output = rfut(
        &home,
        &["latch", "--value", "-3", "--producer-delay-ms", "1"],
        &[],
    );
    assert_eq!(stdout(&output), "value: -3");

    let output = rfut(&home, &["latch", "--fail", "--producer-delay-ms", "1"], &[]);
    assert_eq!(stdout(&output), "failed: producer reported failure");
}

#[test]
fn test_config_layers_file_then_environment() {
    let home = TempDir::new().unwrap();
    let config_file = home.path().join("rfut.toml");
    fs::write(
        &config_file,
        r#"
[pool]
workers = 3
thread_name = "from-file"

[wait]
default_timeout_ms = 1234
"#,
    )
    .unwrap();

    let output = rfut(
        &home,
        &["--config", config_file.to_str().unwrap(), "config"],
        &[("RESULT_FUTURE__POOL__WORKERS", "6")],
    );
    let text = stdout(&output);
    assert!(text.contains("workers = 6"), "{text}");
    assert!(text.contains("thread_name = \"from-file\""), "{text}");
    assert!(text.contains("default_timeout_ms = 1234"), "{text}");
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");
    let output = rfut(&home, &["--config", missing.to_str().unwrap(), "config"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}

#[test]
fn test_invalid_worker_count_rejected() {
    let home = TempDir::new().unwrap();
    let output = rfut(&home, &["config"], &[("RESULT_FUTURE__POOL__WORKERS", "0")]);
    assert!(!output.status.success());
}
