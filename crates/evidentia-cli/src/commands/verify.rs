//! Verify command implementation.

use evidentia_canonical::Canonicalizer;
use evidentia_journal::{verify_entry, ChainVerifier, JournalReader, ReadMode};
use serde_json::json;

pub fn run(
    journal: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = JournalReader::open(&journal, ReadMode::Strict)
        .map_err(|e| format!("Failed to open journal: {}", e))?;

    let canonicalizer = Canonicalizer::default();
    let mut chain = ChainVerifier::new();

    let mut all_ok = true;
    let mut results = Vec::new();

    while let Some(entry) = reader.read_entry()? {
        let id = entry
            .get("id")
            .and_then(|v| v.as_u64())
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());
        let tx_type = entry
            .get("tx_type")
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string();

        let hash_ok = match verify_entry(&entry, &canonicalizer) {
            Ok(ok) => ok,
            Err(e) => {
                if !json_output {
                    eprintln!("Error verifying entry {}: {}", id, e);
                }
                false
            }
        };

        let chain_ok = match chain.observe(&entry) {
            Ok(()) => true,
            Err(e) => {
                if !json_output {
                    eprintln!("Chain broken at entry {}: {}", id, e);
                }
                false
            }
        };

        all_ok = all_ok && hash_ok && chain_ok;
        results.push((id, tx_type, hash_ok, chain_ok));
    }

    if json_output {
        let json_results: Vec<_> = results
            .into_iter()
            .map(|(id, tx_type, hash_ok, chain_ok)| {
                json!({
                    "id": id,
                    "tx_type": tx_type,
                    "hash_ok": hash_ok,
                    "chain_ok": chain_ok,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        println!("{:<8} {:<20} {:<10} {}", "ID", "TX_TYPE", "HASH", "CHAIN");
        println!("{}", "-".repeat(50));
        for (id, tx_type, hash_ok, chain_ok) in results {
            println!(
                "{:<8} {:<20} {:<10} {}",
                id,
                tx_type,
                if hash_ok { "ok" } else { "INVALID" },
                if chain_ok { "ok" } else { "BROKEN" }
            );
        }
    }

    if strict && !all_ok {
        std::process::exit(1);
    }

    Ok(())
}
