//! List command implementation.

use crate::output;
use evidentia_journal::{JournalReader, ReadMode};

pub fn run(
    journal: String,
    json: bool,
    max_entries: Option<u64>,
    max_size: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check journal size if limit is set
    if let Some(max_bytes) = max_size {
        let metadata = std::fs::metadata(&journal)?;
        if metadata.len() > max_bytes {
            return Err(format!(
                "Journal size {} exceeds maximum {} bytes",
                metadata.len(),
                max_bytes
            )
            .into());
        }
    }

    let mut reader = JournalReader::open(&journal, ReadMode::Strict)
        .map_err(|e| format!("Failed to open journal file: {}: {}", journal, e))?;

    // Output header if table format
    if !json {
        output::print_table_header();
    }

    let mut entry_count: u64 = 0;
    while let Some(entry) = reader.read_entry()? {
        // Check max_entries limit
        if let Some(max) = max_entries {
            if entry_count >= max {
                break;
            }
        }

        if json {
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            println!("{}", output::format_table_row(&entry));
        }
        entry_count += 1;
    }

    Ok(())
}
