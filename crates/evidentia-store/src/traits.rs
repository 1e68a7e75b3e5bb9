//! Storage backend traits.
//!
//! These interfaces are intentionally narrow: only the operations the
//! engine needs, so any relational or document store can implement them.
//! All mutating operations carry the constraints the engine's correctness
//! depends on — fingerprint uniqueness on insert and expected-status
//! compare-and-set on update.

use evidentia_canonical::{ActorId, AnomalyId, Digest, DocumentId, SellerId, TemplateVersion, Timestamp};
use evidentia_core::{
    BundleStatus, DocumentStatus, ExportBundle, GeneratedArtifact, TransactionJournalEntry,
};
use serde_json::Value;

use crate::error::StoreError;

/// A journal entry whose id and prev-hash have not yet been assigned.
///
/// The store assigns both under its own lock so that ids are monotonic and
/// the prev-hash chain reflects commit order.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    /// Free-form action tag.
    pub tx_type: String,
    /// Subject of the action.
    pub entity_id: String,
    /// Structured data describing the action.
    pub payload: Value,
    /// When the action was committed.
    pub timestamp: Timestamp,
    /// Actor that performed the action.
    pub actor_id: ActorId,
    /// Precomputed entry hash (canonical payload + timestamp).
    pub hash: Digest,
}

/// Filters and pagination parameters for a journal query.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Restrict to one tx type.
    pub tx_type: Option<String>,
    /// Restrict to one entity.
    pub entity_id: Option<String>,
    /// Restrict to one actor.
    pub actor_id: Option<ActorId>,
    /// Include entries at or after this timestamp.
    pub after: Option<Timestamp>,
    /// Include entries at or before this timestamp.
    pub before: Option<Timestamp>,
    /// Id of the last entry from the previous page (exclusive).
    pub cursor: Option<u64>,
    /// Page size; `None` means the engine default.
    pub limit: Option<usize>,
}

/// One page of journal entries in reverse-chronological order.
#[derive(Debug, Clone)]
pub struct QueryPage {
    /// Matching entries, newest first.
    pub items: Vec<TransactionJournalEntry>,
    /// Cursor for the next page, if more entries match.
    pub next_cursor: Option<u64>,
}

/// CRUD surface for generated artifact records.
pub trait ArtifactStore: Send + Sync {
    /// Inserts a new artifact.
    ///
    /// Fails with [`StoreError::DuplicateFingerprint`] if another record
    /// already holds the `(seller, anomaly, template_version, evidence_hash)`
    /// tuple.
    fn insert_artifact(&self, artifact: &GeneratedArtifact) -> Result<(), StoreError>;

    /// Fetches an artifact by id.
    fn get_artifact(&self, id: &DocumentId) -> Result<Option<GeneratedArtifact>, StoreError>;

    /// Finds the most recently generated artifact for a fingerprint scope.
    fn find_latest_by_scope(
        &self,
        seller_id: &SellerId,
        anomaly_id: &AnomalyId,
        template_version: &TemplateVersion,
    ) -> Result<Option<GeneratedArtifact>, StoreError>;

    /// Lists all artifacts for a seller.
    fn list_by_seller(&self, seller_id: &SellerId) -> Result<Vec<GeneratedArtifact>, StoreError>;

    /// Replaces an artifact record iff its stored status equals `expected`.
    ///
    /// Fails with [`StoreError::StatusConflict`] when a concurrent
    /// transition got there first.
    fn update_artifact(
        &self,
        artifact: &GeneratedArtifact,
        expected: DocumentStatus,
    ) -> Result<(), StoreError>;

    /// Batch compare-and-set: replaces every record or none.
    ///
    /// Used by the export bundler so a member flip is all-or-nothing.
    fn update_artifacts(
        &self,
        updated: &[GeneratedArtifact],
        expected: &[DocumentStatus],
    ) -> Result<(), StoreError>;
}

/// CRUD surface for export bundle records.
pub trait BundleStore: Send + Sync {
    /// Inserts a new bundle.
    fn insert_bundle(&self, bundle: &ExportBundle) -> Result<(), StoreError>;

    /// Fetches a bundle by id.
    fn get_bundle(&self, id: &evidentia_canonical::BundleId)
        -> Result<Option<ExportBundle>, StoreError>;

    /// Replaces a bundle record iff its stored status equals `expected`.
    fn update_bundle(&self, bundle: &ExportBundle, expected: BundleStatus)
        -> Result<(), StoreError>;
}

/// Append-only surface for the transaction journal.
///
/// Implementations never mutate or delete entries; the only write is an
/// append that assigns the next monotonic id and chains the prev-hash.
pub trait JournalStore: Send + Sync {
    /// Appends an entry, assigning its id and prev-hash atomically.
    fn append_entry(&self, pending: PendingEntry)
        -> Result<TransactionJournalEntry, StoreError>;

    /// Fetches an entry by id.
    fn get_entry(&self, id: u64) -> Result<Option<TransactionJournalEntry>, StoreError>;

    /// Queries entries in reverse-chronological order with cursor pagination.
    fn query_entries(&self, query: &EntryQuery) -> Result<QueryPage, StoreError>;
}
