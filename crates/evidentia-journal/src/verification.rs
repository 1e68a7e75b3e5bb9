//! Verification helpers for journal entries.
//!
//! Two independent checks:
//! - entry hash: the `hash` field matches the canonical payload + timestamp
//! - chain: each entry's `prev_hash` equals the previous entry's `hash`,
//!   with ids strictly increasing

use crate::entry::EntryJson;
use crate::errors::JournalError;
use evidentia_canonical::Canonicalizer;
use evidentia_core::{verify_entry_hash, TransactionJournalEntry};

/// Verifies an entry JSON against its claimed hash.
///
/// This parses the entry, canonicalizes its payload, and checks that the
/// recomputed hash matches the `hash` field.
pub fn verify_entry(
    entry: &EntryJson,
    canonicalizer: &Canonicalizer,
) -> Result<bool, JournalError> {
    let typed: TransactionJournalEntry = serde_json::from_value(entry.clone())
        .map_err(|e| JournalError::InvalidEntry(format!("unparseable entry: {}", e)))?;

    verify_entry_hash(canonicalizer, &typed)
        .map_err(|e| JournalError::InvalidEntry(format!("hash computation failed: {}", e)))
}

/// Incremental prev-hash chain verifier.
///
/// Feed entries in file order; the verifier checks id monotonicity and
/// prev-hash linkage as it goes.
#[derive(Debug, Default)]
pub struct ChainVerifier {
    last: Option<TransactionJournalEntry>,
}

impl ChainVerifier {
    /// Creates a verifier expecting the first entry of a journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes the next entry in file order.
    pub fn observe(&mut self, entry: &EntryJson) -> Result<(), JournalError> {
        let typed: TransactionJournalEntry = serde_json::from_value(entry.clone())
            .map_err(|e| JournalError::InvalidEntry(format!("unparseable entry: {}", e)))?;

        if let Some(prev) = &self.last {
            if typed.id <= prev.id {
                return Err(JournalError::BrokenChain {
                    entry_id: typed.id,
                    reason: format!("id {} does not increase past {}", typed.id, prev.id),
                });
            }
            if typed.prev_hash.as_ref() != Some(&prev.hash) {
                return Err(JournalError::BrokenChain {
                    entry_id: typed.id,
                    reason: "prev_hash does not match previous entry hash".to_string(),
                });
            }
        } else if typed.prev_hash.is_some() {
            return Err(JournalError::BrokenChain {
                entry_id: typed.id,
                reason: "first entry carries a prev_hash".to_string(),
            });
        }

        self.last = Some(typed);
        Ok(())
    }
}

/// Verifies the prev-hash chain of a full entry sequence in file order.
pub fn verify_chain(entries: &[EntryJson]) -> Result<(), JournalError> {
    let mut verifier = ChainVerifier::new();
    for entry in entries {
        verifier.observe(entry)?;
    }
    Ok(())
}
