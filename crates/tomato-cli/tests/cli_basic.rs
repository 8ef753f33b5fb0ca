//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temp vault and a temp config file
//! and verify outputs and the documents left behind.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_stdin(home, args, "")
}

fn run_cli_with_stdin(home: &Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let vault = home.join("vault");
    let config = home.join("config.toml");
    let mut child = Command::new(env!("CARGO_BIN_EXE_tomato"))
        .arg("--vault")
        .arg(&vault)
        .arg("--config")
        .arg(&config)
        .args(args)
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
fn test_count_show_creates_journal() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["count", "show", "--date", "2026-10-19"]);
    assert_eq!(code, 0, "count show failed");
    assert_eq!(stdout.trim(), "0");
    assert_eq!(
        fs::read_to_string(home.path().join("vault/journals/2026-10-19.md")).unwrap(),
        "---\n🍅: \"0\"\n---\n"
    );
}

#[test]
fn test_count_set_preserves_notes() {
    let home = tempfile::tempdir().unwrap();
    let journal = home.path().join("vault/journals/2026-10-19.md");
    fs::create_dir_all(journal.parent().unwrap()).unwrap();
    fs::write(&journal, "---\n🍅: \"2\"\n---\nnotes here").unwrap();

    let (code, _, _) = run_cli(home.path(), &["count", "set", "3", "--date", "2026-10-19"]);
    assert_eq!(code, 0, "count set failed");
    assert_eq!(
        fs::read_to_string(&journal).unwrap(),
        "---\n🍅: \"3\"\n---\nnotes here"
    );

    let (code, stdout, _) = run_cli(
        home.path(),
        &["count", "show", "--date", "2026-10-19", "--json"],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["count"], 3);
    assert_eq!(report["path"], "journals/2026-10-19.md");
}

#[test]
fn test_count_add() {
    let home = tempfile::tempdir().unwrap();
    let (_, stdout, _) = run_cli(home.path(), &["count", "add", "--date", "2026-01-02"]);
    assert_eq!(stdout.trim(), "1");
    let (_, stdout, _) = run_cli(home.path(), &["count", "add", "--date", "2026-01-02"]);
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn test_count_rejects_bad_date() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["count", "show", "--date", "yesterday"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "set", "timer.focus_minutes", "50"]);
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "timer.focus_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "timer.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key: timer.nope"));
}

#[test]
fn test_panel_session_merges_notes() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_with_stdin(
        home.path(),
        &["panel", "--json"],
        "start\nnote sketch the parser\nstop\nreset\nquit\n",
    );
    assert_eq!(code, 0, "panel failed");

    let types: Vec<String> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert!(types.contains(&"TimerStarted".to_string()));
    assert!(types.contains(&"TimerStopped".to_string()));
    assert!(types.contains(&"TimerReset".to_string()));

    let journals = home.path().join("vault/journals");
    let entry = fs::read_dir(&journals).unwrap().next().unwrap().unwrap();
    let journal = fs::read_to_string(entry.path()).unwrap();
    assert!(journal.starts_with("---\n🍅: \"0\"\n---\n\n\n### "));
    assert!(journal.ends_with("sketch the parser\n"));
    assert!(!home.path().join("vault/p.zen.md").exists());
}

#[test]
fn test_completions_print_script() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("tomato"));
    assert!(!home.path().join("config.toml").exists());
}
