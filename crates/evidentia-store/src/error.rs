//! Error types for store operations.

use evidentia_canonical::DocumentId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind ("document", "bundle", "journal entry").
        kind: &'static str,
        /// Offending id.
        id: String,
    },
    /// Insert violated the fingerprint uniqueness constraint.
    ///
    /// The engine converts this into the idempotent duplicate outcome:
    /// "someone else won the race" is not a failure.
    #[error("fingerprint already taken by document {document_id}")]
    DuplicateFingerprint {
        /// Document that holds the fingerprint.
        document_id: DocumentId,
    },
    /// Compare-and-set update lost against a concurrent transition.
    #[error("concurrent update on {kind} {id}")]
    StatusConflict {
        /// Record kind.
        kind: &'static str,
        /// Record id.
        id: String,
    },
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] evidentia_journal::JournalError),
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Parse error while loading stored records.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Other backend failure.
    #[error("{0}")]
    Backend(String),
}
