//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command, feeding `stdin`, and return (code, stdout, stderr).
fn run_cli(args: &[&str], stdin: &str) -> (i32, String, String) {
    let home = tempfile::tempdir().expect("Failed to create temp HOME");
    let mut child = Command::new(env!("CARGO_BIN_EXE_yuletide"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("YULETIDE_ENV")
        .env_remove("YULETIDE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_once_on_christmas() {
    let (code, stdout, _) = run_cli(&["once", "--date", "Dec 25"], "");
    assert_eq!(code, 0, "once failed");
    assert!(stdout.contains("It is Christmas!"));
}

#[test]
fn test_once_reports_progress() {
    let (code, stdout, _) = run_cli(&["once", "--date", "Jul 04"], "");
    assert_eq!(code, 0, "once failed");
    assert!(stdout.contains("It is not Christmas yet."));
    assert!(stdout.contains("53%"));
}

#[test]
fn test_once_json() {
    let (code, stdout, _) = run_cli(&["once", "--date", "Nov 09", "--json"], "");
    assert_eq!(code, 0, "once --json failed");
    let types: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("JSON line");
            value["type"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(types, vec!["CycleStarted", "NotYet"]);
}

#[test]
fn test_check_ends_on_christmas_without_menu() {
    let (code, stdout, _) = run_cli(&["check", "--date", "dec 25"], "");
    assert_eq!(code, 0, "check failed");
    assert!(stdout.contains("It is Christmas!"));
    assert!(!stdout.contains("Check again"));
}

#[test]
fn test_check_user_ends_session() {
    let (code, stdout, _) = run_cli(&["check", "--date", "Nov 09"], "e\n");
    assert_eq!(code, 0, "check failed");
    assert!(stdout.contains("It is not Christmas yet."));
    assert!(stdout.contains("Check again (c), indefinitely (i), or end (e)?"));
}

#[test]
fn test_check_forces_indefinite_after_invalid_input() {
    let (code, stdout, _) = run_cli(
        &["check", "--date", "Nov 09", "--interval-ms", "60000"],
        "x\ny\nz\n\n",
    );
    assert_eq!(code, 0, "check failed");
    assert_eq!(stdout.matches("Invalid choice.").count(), 3);
    assert!(stdout.contains("Too many invalid choices. Checking indefinitely."));
    assert!(stdout.contains("Press Enter to stop checking"));
}

#[test]
fn test_check_rejects_bad_date() {
    let (code, _, stderr) = run_cli(&["check", "--date", "Smarch 13"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("Smarch") || stderr.contains("month"));
}

#[test]
fn test_patterns_list() {
    let (code, stdout, _) = run_cli(&["patterns"], "");
    assert_eq!(code, 0, "patterns failed");
    assert_eq!(stdout.lines().count(), 8);
}

#[test]
fn test_patterns_match() {
    let (code, stdout, _) = run_cli(&["patterns", "25/12"], "");
    assert_eq!(code, 0, "patterns failed");
    assert!(stdout.contains("match: 25/12"));
}

#[test]
fn test_config_get() {
    let (code, stdout, _) = run_cli(&["config", "get", "watch.interval_ms"], "");
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "1000");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let (code, _, stderr) = run_cli(&["config", "set", "watch.nope", "1"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list() {
    let (code, stdout, _) = run_cli(&["config", "list"], "");
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("JSON config");
    assert_eq!(parsed["date"]["source"], "clock");
}
