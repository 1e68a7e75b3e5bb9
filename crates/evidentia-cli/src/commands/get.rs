//! Get command implementation.

use crate::output;
use evidentia_journal::{JournalReader, ReadMode};

pub fn run(journal: String, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = JournalReader::open(&journal, ReadMode::Strict)
        .map_err(|e| format!("Failed to open journal: {}", e))?;

    while let Some(entry) = reader.read_entry()? {
        if entry.get("id").and_then(|v| v.as_u64()) == Some(id) {
            println!("{}", output::format_json(&entry));
            return Ok(());
        }
    }

    Err(format!("Entry {} not found", id).into())
}
