//! Inspect command implementation.

use std::collections::BTreeMap;

use evidentia_journal::{verify_chain, JournalReader, ReadMode};
use serde_json::json;

pub fn run(journal: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = JournalReader::open(&journal, ReadMode::Strict)
        .map_err(|e| format!("Failed to open journal: {}", e))?;

    let mut entries = Vec::new();
    let mut by_type = BTreeMap::<String, u64>::new();
    while let Some(entry) = reader.read_entry()? {
        let tx_type = entry
            .get("tx_type")
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string();
        *by_type.entry(tx_type).or_insert(0) += 1;
        entries.push(entry);
    }

    let chain_ok = verify_chain(&entries).is_ok();
    let first_id = entries.first().and_then(|e| e.get("id").and_then(|v| v.as_u64()));
    let last_id = entries.last().and_then(|e| e.get("id").and_then(|v| v.as_u64()));

    let output = json!({
        "entry_count": entries.len(),
        "first_id": first_id,
        "last_id": last_id,
        "chain_ok": chain_ok,
        "by_tx_type": by_type,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
