//! Document lifecycle service.
//!
//! Applies the pure transition functions to stored records, persists the
//! result with a compare-and-set, and journals every successful
//! transition. A racer that loses the compare-and-set re-reads the record
//! and reports the precise lifecycle violation instead of a storage
//! error.

use std::sync::Arc;

use evidentia_canonical::{ActorId, Canonicalizer, DocumentId};
use evidentia_core::entry::tx;
use evidentia_core::{lifecycle, snapshot_content_hash, GeneratedArtifact, TransactionJournalEntry};
use evidentia_store::{ArtifactStore, StoreError};
use serde_json::json;

use crate::clock::Clock;
use crate::collaborators::SyncProvider;
use crate::error::EngineError;
use crate::journal::TransactionJournal;

/// Lock and refresh operations over stored artifacts.
pub struct DocumentService {
    artifacts: Arc<dyn ArtifactStore>,
    sync: Arc<dyn SyncProvider>,
    journal: TransactionJournal,
    canonicalizer: Canonicalizer,
    clock: Arc<dyn Clock>,
}

impl DocumentService {
    /// Wires a document service from its collaborators.
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        sync: Arc<dyn SyncProvider>,
        journal: TransactionJournal,
        canonicalizer: Canonicalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            artifacts,
            sync,
            journal,
            canonicalizer,
            clock,
        }
    }

    /// Fetches one artifact by id.
    pub fn document(&self, id: &DocumentId) -> Result<GeneratedArtifact, EngineError> {
        self.artifacts
            .get_artifact(id)?
            .ok_or(EngineError::NotFound {
                kind: "document",
                id: id.to_string(),
            })
    }

    /// Locks a Draft document, freezing its content-addressed fields.
    pub fn lock_document(
        &self,
        id: &DocumentId,
        actor: &ActorId,
    ) -> Result<GeneratedArtifact, EngineError> {
        let current = self.document(id)?;
        let locked = lifecycle::lock(&current, actor, &self.clock.now())?;

        match self.artifacts.update_artifact(&locked, current.status) {
            Ok(()) => {}
            Err(StoreError::StatusConflict { .. }) => {
                // Lost the race; report the guard violation the winner
                // left behind.
                let fresh = self.document(id)?;
                lifecycle::lock(&fresh, actor, &self.clock.now())?;
                return Err(EngineError::Storage(StoreError::StatusConflict {
                    kind: "document",
                    id: id.to_string(),
                }));
            }
            Err(other) => return Err(other.into()),
        }

        self.journal.record(
            tx::DOCUMENT_LOCKED,
            id.as_ref(),
            json!({ "locked_by": actor }),
            actor,
        )?;
        Ok(locked)
    }

    /// Recomputes a Draft document's content hash from the latest sync
    /// snapshot.
    ///
    /// Fails with `ImmutableDocument` before touching the provider when
    /// the document is Locked or Exported, and with `SyncUnavailable`
    /// when no snapshot exists; drift detection never mutates an
    /// immutable record and never invents a hash.
    pub fn refresh_document(
        &self,
        id: &DocumentId,
        actor: &ActorId,
    ) -> Result<GeneratedArtifact, EngineError> {
        let current = self.document(id)?;
        if current.is_immutable() {
            return Err(evidentia_core::LifecycleError::ImmutableDocument {
                document_id: current.id.clone(),
                status: current.status,
            }
            .into());
        }

        let snapshot = self
            .sync
            .latest_snapshot(&current.seller_id)
            .map_err(|_| EngineError::SyncUnavailable {
                seller_id: current.seller_id.clone(),
            })?
            .ok_or(EngineError::SyncUnavailable {
                seller_id: current.seller_id.clone(),
            })?;

        let before = current.content_hash.clone();
        let after = snapshot_content_hash(&self.canonicalizer, &snapshot)?;
        let refreshed = lifecycle::refreshed(&current, after.clone())?;
        self.artifacts.update_artifact(&refreshed, current.status)?;

        self.journal.record(
            tx::DOCUMENT_REFRESHED,
            id.as_ref(),
            json!({ "before": before, "after": after }),
            actor,
        )?;
        Ok(refreshed)
    }

    /// Returns the complete journal history for a document, newest first.
    pub fn audit_trail(
        &self,
        id: &DocumentId,
    ) -> Result<Vec<TransactionJournalEntry>, EngineError> {
        // Existence check first so an unknown id is NotFound, not an
        // empty trail.
        self.document(id)?;
        self.journal.audit_trail(id.as_ref())
    }
}
