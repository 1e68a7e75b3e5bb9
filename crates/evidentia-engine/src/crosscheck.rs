//! Sync cross-check engine.
//!
//! Compares a document's recorded content hash against the canonical
//! hash of the seller's latest sync snapshot. Absence of sync data is a
//! verdict, not a failure: the check reports "not synced, no data"
//! instead of erroring. Out-of-sync verdicts are journaled so the drift
//! itself becomes part of the audit trail.

use std::sync::Arc;

use evidentia_canonical::{ActorId, Canonicalizer, Digest, DocumentId, SellerId};
use evidentia_core::entry::tx;
use evidentia_core::snapshot_content_hash;
use evidentia_store::{ArtifactStore, EntryQuery};
use serde::Serialize;
use serde_json::json;

use crate::error::EngineError;
use crate::collaborators::SyncProvider;
use crate::journal::{TransactionJournal, MAX_PAGE_SIZE};

/// Result of cross-checking one document.
#[derive(Debug, Clone, Serialize)]
pub struct CrossCheckVerdict {
    /// True when the document's content hash matches the latest snapshot.
    pub synced: bool,
    /// The document's recorded content hash.
    pub current_hash: Digest,
    /// Canonical hash of the latest snapshot, if one exists.
    pub latest_sync_hash: Option<Digest>,
    /// Human-readable findings; empty when synced.
    pub warnings: Vec<String>,
}

/// Seller-level sync rollup.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    /// Seller the summary covers.
    pub seller_id: SellerId,
    /// Documents examined.
    pub total: usize,
    /// Documents matching the latest snapshot hash.
    pub synced: usize,
    /// Documents whose content hash has drifted.
    pub out_of_sync: usize,
    /// One warning per drifted document, plus a no-data warning when the
    /// provider has no snapshot.
    pub warnings: Vec<String>,
}

/// Aggregate sync health across sellers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncHealthMetrics {
    /// Sellers examined.
    pub sellers_checked: usize,
    /// Documents examined across all sellers.
    pub total_documents: usize,
    /// Documents in sync with their seller's latest snapshot.
    pub synced_documents: usize,
    /// Documents that have drifted.
    pub out_of_sync_documents: usize,
    /// Total `sync_warning` entries ever journaled.
    pub warning_entries: usize,
}

/// Detects drift between stored documents and external sync state.
pub struct SyncCrossCheck {
    artifacts: Arc<dyn ArtifactStore>,
    sync: Arc<dyn SyncProvider>,
    journal: TransactionJournal,
    canonicalizer: Canonicalizer,
}

impl SyncCrossCheck {
    /// Wires a cross-check engine from its collaborators.
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        sync: Arc<dyn SyncProvider>,
        journal: TransactionJournal,
        canonicalizer: Canonicalizer,
    ) -> Self {
        Self {
            artifacts,
            sync,
            journal,
            canonicalizer,
        }
    }

    /// Cross-checks one document against the seller's latest snapshot.
    pub fn check(
        &self,
        document_id: &DocumentId,
        actor: &ActorId,
    ) -> Result<CrossCheckVerdict, EngineError> {
        let document = self
            .artifacts
            .get_artifact(document_id)?
            .ok_or(EngineError::NotFound {
                kind: "document",
                id: document_id.to_string(),
            })?;

        let snapshot = match self.sync.latest_snapshot(&document.seller_id) {
            Ok(Some(snapshot)) => snapshot,
            // No data and unreachable provider both yield a "not synced,
            // no data" verdict rather than an error.
            Ok(None) | Err(_) => {
                let verdict = CrossCheckVerdict {
                    synced: false,
                    current_hash: document.content_hash.clone(),
                    latest_sync_hash: None,
                    warnings: vec![format!(
                        "no recent sync data for seller {}",
                        document.seller_id
                    )],
                };
                self.record_warning(document_id, actor, &verdict)?;
                return Ok(verdict);
            }
        };

        let latest = snapshot_content_hash(&self.canonicalizer, &snapshot)?;

        // A snapshot with no anomalies counts as no recent data, even
        // though it hashes cleanly.
        if snapshot.is_empty() {
            let verdict = CrossCheckVerdict {
                synced: false,
                current_hash: document.content_hash.clone(),
                latest_sync_hash: Some(latest),
                warnings: vec![format!(
                    "no recent sync data for seller {}",
                    document.seller_id
                )],
            };
            self.record_warning(document_id, actor, &verdict)?;
            return Ok(verdict);
        }

        if document.content_hash == latest {
            return Ok(CrossCheckVerdict {
                synced: true,
                current_hash: document.content_hash,
                latest_sync_hash: Some(latest),
                warnings: Vec::new(),
            });
        }

        let mut warnings = vec![format!(
            "document {} content hash does not match the latest sync state",
            document.id
        )];
        if document.generated_at < snapshot.synced_at {
            warnings.push(format!(
                "document {} was generated before the latest sync",
                document.id
            ));
        }
        let new_anomalies = snapshot
            .anomalies
            .iter()
            .filter(|a| a.detected_at > document.generated_at)
            .count();
        if new_anomalies > 0 {
            warnings.push(format!(
                "{new_anomalies} new anomalies detected since document generation"
            ));
        }
        let high = snapshot
            .anomalies
            .iter()
            .filter(|a| a.severity.is_high())
            .count();
        if high > 0 {
            warnings.push(format!("{high} high-severity anomalies in the latest snapshot"));
        }

        let verdict = CrossCheckVerdict {
            synced: false,
            current_hash: document.content_hash,
            latest_sync_hash: Some(latest),
            warnings,
        };
        self.record_warning(document_id, actor, &verdict)?;
        Ok(verdict)
    }

    fn record_warning(
        &self,
        document_id: &DocumentId,
        actor: &ActorId,
        verdict: &CrossCheckVerdict,
    ) -> Result<(), EngineError> {
        self.journal.record(
            tx::SYNC_WARNING,
            document_id.as_ref(),
            json!({
                "current_hash": verdict.current_hash,
                "latest_sync_hash": verdict.latest_sync_hash,
                "warnings": verdict.warnings,
            }),
            actor,
        )?;
        Ok(())
    }

    /// Rolls up sync state for every document of one seller.
    ///
    /// The snapshot hash is computed once and compared against each
    /// document, not recomputed per document.
    pub fn seller_sync_summary(&self, seller_id: &SellerId) -> Result<SyncSummary, EngineError> {
        let documents = self.artifacts.list_by_seller(seller_id)?;
        let total = documents.len();

        let latest = match self.sync.latest_snapshot(seller_id) {
            Ok(Some(snapshot)) => Some(snapshot_content_hash(&self.canonicalizer, &snapshot)?),
            Ok(None) | Err(_) => None,
        };

        let Some(latest) = latest else {
            return Ok(SyncSummary {
                seller_id: seller_id.clone(),
                total,
                synced: 0,
                out_of_sync: total,
                warnings: vec![format!("no recent sync data for seller {seller_id}")],
            });
        };

        let mut synced = 0;
        let mut warnings = Vec::new();
        for document in &documents {
            if document.content_hash == latest {
                synced += 1;
            } else {
                warnings.push(format!(
                    "document {} is out of sync with the latest snapshot",
                    document.id
                ));
            }
        }

        Ok(SyncSummary {
            seller_id: seller_id.clone(),
            total,
            synced,
            out_of_sync: total - synced,
            warnings,
        })
    }

    /// Aggregates sync health across the given sellers.
    pub fn sync_health_metrics(
        &self,
        sellers: &[SellerId],
    ) -> Result<SyncHealthMetrics, EngineError> {
        let mut metrics = SyncHealthMetrics {
            sellers_checked: sellers.len(),
            ..SyncHealthMetrics::default()
        };
        for seller in sellers {
            let summary = self.seller_sync_summary(seller)?;
            metrics.total_documents += summary.total;
            metrics.synced_documents += summary.synced;
            metrics.out_of_sync_documents += summary.out_of_sync;
        }

        let mut cursor = None;
        loop {
            let page = self.journal.entries(EntryQuery {
                tx_type: Some(tx::SYNC_WARNING.to_string()),
                cursor,
                limit: Some(MAX_PAGE_SIZE),
                ..EntryQuery::default()
            })?;
            metrics.warning_entries += page.items.len();
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(metrics)
    }
}
