use evidentia_canonical::{
    sha256_hex, ActorId, CanonicalizationError, Canonicalizer, Digest, Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable tx-type tags recorded by the engine services.
pub mod tx {
    /// A new artifact was generated in Draft state.
    pub const DOCUMENT_GENERATED: &str = "document_generated";
    /// An artifact was locked.
    pub const DOCUMENT_LOCKED: &str = "document_locked";
    /// A Draft artifact's content hash was refreshed from sync data.
    pub const DOCUMENT_REFRESHED: &str = "document_refreshed";
    /// An artifact was exported as part of a bundle.
    pub const DOCUMENT_EXPORTED: &str = "document_exported";
    /// A cross-check detected an out-of-sync artifact.
    pub const SYNC_WARNING: &str = "sync_warning";
    /// A bundle resolved to Completed.
    pub const BUNDLE_COMPLETED: &str = "bundle_completed";
    /// A bundle resolved to Failed.
    pub const BUNDLE_FAILED: &str = "bundle_failed";
}

/// Append-only record of one state-changing action.
///
/// Entries are immutable once created; a "correction" is a new entry whose
/// payload references the old one. `hash` covers the canonical payload and
/// timestamp; `prev_hash` chains to the previous entry in the journal for
/// tamper evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionJournalEntry {
    /// Server-assigned monotonically increasing id, usable as a cursor.
    pub id: u64,
    /// Free-form action tag (see [`tx`]).
    pub tx_type: String,
    /// Subject of the action (document id, bundle id, ...).
    pub entity_id: String,
    /// Structured data describing the action.
    pub payload: Value,
    /// When the action was committed.
    pub timestamp: Timestamp,
    /// Actor that performed the action.
    pub actor_id: ActorId,
    /// `sha256_hex(canonicalize(payload) + "|" + timestamp)`.
    pub hash: Digest,
    /// Hash of the previous journal entry, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<Digest>,
}

/// Computes the entry hash over the canonical payload and timestamp.
pub fn compute_entry_hash(
    canonicalizer: &Canonicalizer,
    payload: &Value,
    timestamp: &Timestamp,
) -> Result<Digest, CanonicalizationError> {
    let canonical = canonicalizer.canonicalize(payload)?;
    let mut bytes = canonical.bytes;
    bytes.push(b'|');
    bytes.extend_from_slice(timestamp.as_ref().as_bytes());
    Ok(sha256_hex(&bytes))
}

/// Verifies a journal entry's hash against its payload and timestamp.
pub fn verify_entry_hash(
    canonicalizer: &Canonicalizer,
    entry: &TransactionJournalEntry,
) -> Result<bool, CanonicalizationError> {
    let computed = compute_entry_hash(canonicalizer, &entry.payload, &entry.timestamp)?;
    Ok(computed == entry.hash)
}
