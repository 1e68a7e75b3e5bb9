//! In-memory reference backend.
//!
//! A single mutex guards all records, so the uniqueness constraint, the
//! compare-and-set transitions, and journal id/prev-hash assignment are
//! each atomic with respect to concurrent callers. Suitable for tests and
//! single-process deployments; the traits allow any database to take its
//! place.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use evidentia_canonical::{AnomalyId, BundleId, Digest, DocumentId, SellerId, TemplateVersion};
use evidentia_core::{
    BundleStatus, DocumentStatus, ExportBundle, Fingerprint, GeneratedArtifact,
    TransactionJournalEntry,
};

use crate::error::StoreError;
use crate::filter::paginate;
use crate::traits::{
    ArtifactStore, BundleStore, EntryQuery, JournalStore, PendingEntry, QueryPage,
};

#[derive(Default)]
struct Inner {
    artifacts: BTreeMap<DocumentId, GeneratedArtifact>,
    fingerprints: HashMap<Fingerprint, DocumentId>,
    bundles: BTreeMap<BundleId, ExportBundle>,
    entries: Vec<TransactionJournalEntry>,
    last_hash: Option<Digest>,
    next_entry_id: u64,
}

/// In-memory store implementing all three backend traits.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_entry_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

impl ArtifactStore for MemoryStore {
    fn insert_artifact(&self, artifact: &GeneratedArtifact) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let fingerprint = artifact.fingerprint();
        if let Some(existing) = inner.fingerprints.get(&fingerprint) {
            return Err(StoreError::DuplicateFingerprint {
                document_id: existing.clone(),
            });
        }
        if inner.artifacts.contains_key(&artifact.id) {
            return Err(StoreError::Backend(format!(
                "duplicate document id: {}",
                artifact.id
            )));
        }
        inner.fingerprints.insert(fingerprint, artifact.id.clone());
        inner.artifacts.insert(artifact.id.clone(), artifact.clone());
        Ok(())
    }

    fn get_artifact(&self, id: &DocumentId) -> Result<Option<GeneratedArtifact>, StoreError> {
        Ok(self.lock()?.artifacts.get(id).cloned())
    }

    fn find_latest_by_scope(
        &self,
        seller_id: &SellerId,
        anomaly_id: &AnomalyId,
        template_version: &TemplateVersion,
    ) -> Result<Option<GeneratedArtifact>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .artifacts
            .values()
            .filter(|a| {
                a.seller_id == *seller_id
                    && a.anomaly_id == *anomaly_id
                    && a.template_version == *template_version
            })
            .max_by(|a, b| {
                a.generated_at
                    .cmp(&b.generated_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned())
    }

    fn list_by_seller(&self, seller_id: &SellerId) -> Result<Vec<GeneratedArtifact>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .artifacts
            .values()
            .filter(|a| a.seller_id == *seller_id)
            .cloned()
            .collect())
    }

    fn update_artifact(
        &self,
        artifact: &GeneratedArtifact,
        expected: DocumentStatus,
    ) -> Result<(), StoreError> {
        self.update_artifacts(std::slice::from_ref(artifact), &[expected])
    }

    fn update_artifacts(
        &self,
        updated: &[GeneratedArtifact],
        expected: &[DocumentStatus],
    ) -> Result<(), StoreError> {
        if updated.len() != expected.len() {
            return Err(StoreError::Backend(
                "updated/expected length mismatch".to_string(),
            ));
        }
        let mut inner = self.lock()?;

        // Validate every expected status before the first write.
        for (artifact, expected_status) in updated.iter().zip(expected) {
            let current = inner.artifacts.get(&artifact.id).ok_or(StoreError::NotFound {
                kind: "document",
                id: artifact.id.to_string(),
            })?;
            if current.status != *expected_status {
                return Err(StoreError::StatusConflict {
                    kind: "document",
                    id: artifact.id.to_string(),
                });
            }
        }
        for artifact in updated {
            inner.artifacts.insert(artifact.id.clone(), artifact.clone());
        }
        Ok(())
    }
}

impl BundleStore for MemoryStore {
    fn insert_bundle(&self, bundle: &ExportBundle) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.bundles.contains_key(&bundle.id) {
            return Err(StoreError::Backend(format!(
                "duplicate bundle id: {}",
                bundle.id
            )));
        }
        inner.bundles.insert(bundle.id.clone(), bundle.clone());
        Ok(())
    }

    fn get_bundle(&self, id: &BundleId) -> Result<Option<ExportBundle>, StoreError> {
        Ok(self.lock()?.bundles.get(id).cloned())
    }

    fn update_bundle(
        &self,
        bundle: &ExportBundle,
        expected: BundleStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let current = inner.bundles.get(&bundle.id).ok_or(StoreError::NotFound {
            kind: "bundle",
            id: bundle.id.to_string(),
        })?;
        if current.status != expected {
            return Err(StoreError::StatusConflict {
                kind: "bundle",
                id: bundle.id.to_string(),
            });
        }
        inner.bundles.insert(bundle.id.clone(), bundle.clone());
        Ok(())
    }
}

impl JournalStore for MemoryStore {
    fn append_entry(
        &self,
        pending: PendingEntry,
    ) -> Result<TransactionJournalEntry, StoreError> {
        let mut inner = self.lock()?;
        let entry = TransactionJournalEntry {
            id: inner.next_entry_id,
            tx_type: pending.tx_type,
            entity_id: pending.entity_id,
            payload: pending.payload,
            timestamp: pending.timestamp,
            actor_id: pending.actor_id,
            hash: pending.hash,
            prev_hash: inner.last_hash.clone(),
        };
        inner.next_entry_id += 1;
        inner.last_hash = Some(entry.hash.clone());
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    fn get_entry(&self, id: u64) -> Result<Option<TransactionJournalEntry>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.entries.iter().find(|e| e.id == id).cloned())
    }

    fn query_entries(&self, query: &EntryQuery) -> Result<QueryPage, StoreError> {
        let inner = self.lock()?;
        Ok(paginate(&inner.entries, query))
    }
}
