//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_taskmind-cli"))
        .env("TASKMIND_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_task_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["task", "add", "Write report", "--priority", "high"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("Task created:"));

    let (code, stdout, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0, "Task list failed");
    let tasks = parse_json(&stdout);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"], "Write report");
    assert_eq!(tasks[0]["priority"], "high");
}

#[test]
fn test_task_add_rejects_unknown_priority() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["task", "add", "Write", "--priority", "urgent"]);
    assert_ne!(code, 0);
}

#[test]
fn test_task_done_removes_from_focus() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["task", "add", "Only task"]);
    let (_, stdout, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    let id = parse_json(&stdout)[0]["id"].as_str().unwrap().to_string();

    let (code, _, _) = run_cli(dir.path(), &["task", "done", &id]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["assist", "focus", "--json"]);
    assert_eq!(parse_json(&stdout), serde_json::json!([]));
}

#[test]
fn test_assist_focus_and_risk_with_overdue_task() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(
        dir.path(),
        &["task", "add", "Pay invoice", "--priority", "high", "--due", "2025-06-08"],
    );

    let (code, stdout, _) =
        run_cli(dir.path(), &["assist", "focus", "--today", "2025-06-10", "--json"]);
    assert_eq!(code, 0);
    let focus = parse_json(&stdout);
    assert_eq!(focus[0]["title"], "Pay invoice");
    assert_eq!(focus[0]["reason"], "Overdue by 2 day(s)");

    let (code, stdout, _) =
        run_cli(dir.path(), &["assist", "risk", "--today", "2025-06-10", "--json"]);
    assert_eq!(code, 0);
    let risk = parse_json(&stdout);
    assert_eq!(risk["overallRisk"], "high");
    assert_eq!(risk["warnings"][0]["type"], "overdue");
}

#[test]
fn test_assist_ask_without_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["assist", "ask", "What should I focus on today?"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("I don't see any active tasks"));
}

#[test]
fn test_assistant_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "assistant.enabled", "false"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "assistant.enabled"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "false");

    let (_, stdout, _) = run_cli(dir.path(), &["assist", "insights"]);
    assert!(stdout.contains("Assistant is disabled"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "assistant.mood", "happy"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_task_list_filters_by_category_and_search() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["task", "add", "Quarterly report", "--category", "Work"]);
    run_cli(dir.path(), &["task", "add", "Buy milk"]);
    run_cli(dir.path(), &["task", "add", "Expense report", "--category", "Work"]);

    let (code, stdout, _) = run_cli(dir.path(), &["task", "list", "--category", "Work", "--json"]);
    assert_eq!(code, 0);
    let work = parse_json(&stdout);
    assert_eq!(work.as_array().unwrap().len(), 2);
    assert!(work.as_array().unwrap().iter().all(|t| t["category"] == "Work"));

    let (_, stdout, _) = run_cli(dir.path(), &["task", "list", "--search", "MILK", "--json"]);
    let found = parse_json(&stdout);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["title"], "Buy milk");
    assert_eq!(found[0]["category"], "General");
}

#[test]
fn test_task_update_changes_category() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["task", "add", "Gym"]);
    let (_, stdout, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    let id = parse_json(&stdout)[0]["id"].as_str().unwrap().to_string();

    let (code, _, _) = run_cli(dir.path(), &["task", "update", &id, "--category", "Health"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["task", "get", &id]);
    assert_eq!(parse_json(&stdout)["category"], "Health");
}

#[test]
fn test_config_list_prints_keys() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("assistant.enabled = true"));
    assert!(stdout.contains("cache.ttl_secs = 30"));
}
