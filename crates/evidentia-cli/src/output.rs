//! Output formatting utilities.

use serde_json::Value;

/// Formats an entry as JSON.
pub fn format_json(entry: &Value) -> String {
    serde_json::to_string_pretty(entry).unwrap_or_else(|_| "{}".to_string())
}

/// Formats an entry as a simple table row.
pub fn format_table_row(entry: &Value) -> String {
    let id = entry
        .get("id")
        .and_then(|v| v.as_u64())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());
    let tx_type = entry
        .get("tx_type")
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let entity_id = entry
        .get("entity_id")
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let timestamp = entry
        .get("timestamp")
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let actor_id = entry
        .get("actor_id")
        .and_then(|v| v.as_str())
        .unwrap_or("?");

    format!(
        "{:<8} {:<20} {:<24} {:<26} {}",
        id,
        truncate(tx_type, 20),
        truncate(entity_id, 24),
        truncate(timestamp, 26),
        actor_id
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<8} {:<20} {:<24} {:<26} {}",
        "ID", "TX_TYPE", "ENTITY", "TIMESTAMP", "ACTOR"
    );
    println!("{}", "-".repeat(100));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
