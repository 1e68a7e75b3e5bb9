//! Engine error taxonomy.

use evidentia_canonical::{CanonicalizationError, SellerId};
use evidentia_core::LifecycleError;
use evidentia_store::StoreError;
use thiserror::Error;

/// Failures surfaced by the engine services.
///
/// Lifecycle guard violations pass through untouched so callers can
/// distinguish "you asked for an illegal transition" from "the backend
/// broke". The idempotent duplicate outcome is not represented here at
/// all: it is a success variant of generation, never an error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed input; recoverable by the caller, never retried.
    #[error("validation failed: {reason}")]
    Validation {
        /// What was wrong with the input.
        reason: String,
    },
    /// Referenced artifact, bundle, or journal entry does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind ("document", "bundle", "journal entry").
        kind: &'static str,
        /// Offending id.
        id: String,
    },
    /// A lifecycle guard rejected the transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Evidence or payload could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// The sync data provider could not supply a snapshot where one is
    /// required (refresh). Cross-check verdicts report the absence as
    /// data instead.
    #[error("no sync snapshot available for seller {seller_id}")]
    SyncUnavailable {
        /// Seller whose snapshot was requested.
        seller_id: SellerId,
    },
    /// The rendering collaborator failed to produce artifact bytes.
    #[error("rendering failed: {0}")]
    Render(String),
    /// The underlying store failed; propagated, not swallowed.
    #[error("storage failure: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => EngineError::NotFound { kind, id },
            other => EngineError::Storage(other),
        }
    }
}
