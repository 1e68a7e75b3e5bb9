//! Integration tests for CLI commands.

use evidentia_canonical::{Canonicalizer, Timestamp};
use evidentia_core::compute_entry_hash;
use evidentia_journal::{JournalWriter, WriteOptions};
use serde_json::{json, Value};
use std::process::Command;
use tempfile::TempDir;

fn make_entry(id: u64, tx_type: &str, entity: &str, prev_hash: Option<&Value>) -> Value {
    let canonicalizer = Canonicalizer::default();
    let payload = json!({"entity": entity, "n": id});
    let timestamp = Timestamp::parse(format!("2024-01-01T00:00:{:02}.000Z", id)).unwrap();
    let hash = compute_entry_hash(&canonicalizer, &payload, &timestamp).unwrap();

    let mut entry = json!({
        "id": id,
        "tx_type": tx_type,
        "entity_id": entity,
        "payload": payload,
        "timestamp": timestamp,
        "actor_id": "user:tester",
        "hash": hash,
    });
    if let Some(prev) = prev_hash {
        entry["prev_hash"] = prev.clone();
    }
    entry
}

fn create_test_journal() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("audit.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        let e1 = make_entry(1, "document_generated", "doc-1", None);
        let e2 = make_entry(2, "document_locked", "doc-1", Some(&e1["hash"]));
        let e3 = make_entry(3, "sync_warning", "doc-2", Some(&e2["hash"]));
        writer.append_entry(&e1).unwrap();
        writer.append_entry(&e2).unwrap();
        writer.append_entry(&e3).unwrap();
        writer.finish().unwrap();
    }

    (temp_dir, journal_path.to_string_lossy().to_string())
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new("cargo")
        .args(["run", "--bin", "evidentia", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

#[test]
fn test_list_command() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["list", &journal_path]);
    assert!(success);
    assert!(stdout.contains("TX_TYPE"));
    assert!(stdout.contains("document_locked"));
}

#[test]
fn test_list_json_output() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["list", &journal_path, "--json"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        serde_json::from_str::<Value>(line).expect("Invalid JSON");
    }
}

#[test]
fn test_list_max_entries() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["list", &journal_path, "--json", "--max-entries", "1"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_get_command() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["get", &journal_path, "2"]);
    assert!(success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["tx_type"], "document_locked");
}

#[test]
fn test_get_command_not_found() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, _, stderr) = run_cli(&["get", &journal_path, "99"]);
    assert!(!success);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_verify_command() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["verify", &journal_path, "--strict"]);
    assert!(success);
    assert!(stdout.contains("HASH"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_verify_detects_tampering() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("tampered.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        let mut e1 = make_entry(1, "document_generated", "doc-1", None);
        e1["payload"]["entity"] = json!("doc-evil");
        writer.append_entry(&e1).unwrap();
        writer.finish().unwrap();
    }

    let journal_str = journal_path.to_string_lossy().to_string();
    let (success, _, _) = run_cli(&["verify", &journal_str, "--strict"]);
    assert!(!success, "verify --strict should fail on tampered payload");
}

#[test]
fn test_inspect_command() {
    let (_temp_dir, journal_path) = create_test_journal();

    let (success, stdout, _) = run_cli(&["inspect", &journal_path]);
    assert!(success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["entry_count"], 3);
    assert_eq!(parsed["first_id"], 1);
    assert_eq!(parsed["last_id"], 3);
    assert_eq!(parsed["chain_ok"], true);
    assert_eq!(parsed["by_tx_type"]["document_locked"], 1);
}

#[test]
fn test_canonicalize_command() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.json");
    std::fs::write(&input_path, r#"{"b": 2, "a": 1, "_tmp": true}"#).unwrap();

    let input_str = input_path.to_string_lossy().to_string();
    let (success, stdout, _) = run_cli(&["canonicalize", &input_str]);
    assert!(success);
    assert_eq!(stdout.trim(), r#"{"a":1,"b":2}"#);
}
