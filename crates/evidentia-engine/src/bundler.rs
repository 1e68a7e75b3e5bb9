//! Export bundler.
//!
//! Aggregates eligible documents into a bundle, packages the blob, and
//! flips members to Exported only after packaging succeeds. Eligibility
//! is validated for every member before the first write, so a rejected
//! request leaves no trace; a packaging failure resolves the bundle to
//! Failed and leaves every member untouched.

use std::collections::HashSet;
use std::sync::Arc;

use evidentia_canonical::{ActorId, BundleId, Canonicalizer, DocumentId};
use evidentia_core::entry::tx;
use evidentia_core::{
    lifecycle, BundleFormat, BundleStatus, DocumentStatus, ExportBundle, LifecycleError,
};
use evidentia_store::{ArtifactStore, BundleStore};
use serde_json::json;

use crate::clock::Clock;
use crate::collaborators::BundlePackager;
use crate::error::EngineError;
use crate::journal::TransactionJournal;

/// One request to export a set of documents together.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Members to export; duplicates are collapsed, order preserved.
    pub document_ids: Vec<DocumentId>,
    /// Human-facing bundle name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Output shape of the packaged blob.
    pub format: BundleFormat,
    /// Actor requesting the export.
    pub actor: ActorId,
}

/// Creates export bundles and drives member transitions.
pub struct ExportBundler {
    artifacts: Arc<dyn ArtifactStore>,
    bundles: Arc<dyn BundleStore>,
    packager: Arc<dyn BundlePackager>,
    journal: TransactionJournal,
    canonicalizer: Canonicalizer,
    clock: Arc<dyn Clock>,
}

impl ExportBundler {
    /// Wires an export bundler from its collaborators.
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        bundles: Arc<dyn BundleStore>,
        packager: Arc<dyn BundlePackager>,
        journal: TransactionJournal,
        canonicalizer: Canonicalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            artifacts,
            bundles,
            packager,
            journal,
            canonicalizer,
            clock,
        }
    }

    /// Fetches one bundle by id.
    pub fn bundle(&self, id: &BundleId) -> Result<ExportBundle, EngineError> {
        self.bundles.get_bundle(id)?.ok_or(EngineError::NotFound {
            kind: "bundle",
            id: id.to_string(),
        })
    }

    /// Creates a bundle from the given documents.
    ///
    /// Returns the bundle in its terminal state: Completed when
    /// packaging and the member flip succeeded, Failed when packaging
    /// failed (with every member left untouched).
    pub fn create_bundle(&self, request: BundleRequest) -> Result<ExportBundle, EngineError> {
        if request.name.trim().is_empty() {
            return Err(EngineError::Validation {
                reason: "bundle name must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let document_ids: Vec<DocumentId> = request
            .document_ids
            .iter()
            .filter(|id| seen.insert((*id).clone()))
            .cloned()
            .collect();
        if document_ids.is_empty() {
            return Err(EngineError::Validation {
                reason: "bundle must contain at least one document".to_string(),
            });
        }

        // Validate everything before the first write.
        let mut members = Vec::with_capacity(document_ids.len());
        for id in &document_ids {
            let document = self
                .artifacts
                .get_artifact(id)?
                .ok_or(EngineError::NotFound {
                    kind: "document",
                    id: id.to_string(),
                })?;
            members.push(document);
        }
        let ineligible: Vec<DocumentId> = members
            .iter()
            .filter(|d| !d.is_exportable())
            .map(|d| d.id.clone())
            .collect();
        if !ineligible.is_empty() {
            return Err(LifecycleError::NotExportable {
                document_ids: ineligible,
            }
            .into());
        }

        let now = self.clock.now();
        let seed = self.canonicalizer.hash(&json!({
            "name": request.name,
            "document_ids": document_ids,
            "created_at": now,
        }))?;
        let bundle = ExportBundle {
            id: BundleId::new(format!("bundle-{}", seed.short())),
            name: request.name,
            description: request.description,
            created_by: request.actor.clone(),
            status: BundleStatus::Processing,
            document_ids: document_ids.clone(),
            format: request.format,
            bundle_locator: None,
            created_at: now,
            completed_at: None,
        };
        self.bundles.insert_bundle(&bundle)?;

        let packaged = match self.packager.package(&bundle, &members) {
            Ok(packaged) => packaged,
            Err(err) => return self.resolve_failed(bundle, &request.actor, &err.to_string()),
        };

        // Flip every member to Exported, or none of them.
        let now = self.clock.now();
        let expected: Vec<DocumentStatus> = members.iter().map(|d| d.status).collect();
        let mut exported = Vec::with_capacity(members.len());
        for member in &members {
            exported.push(lifecycle::exported(member, &bundle.id, &request.actor, &now)?);
        }
        if let Err(err) = self.artifacts.update_artifacts(&exported, &expected) {
            let _ = self.resolve_failed(bundle, &request.actor, "member status changed")?;
            return Err(err.into());
        }

        for member in &exported {
            self.journal.record(
                tx::DOCUMENT_EXPORTED,
                member.id.as_ref(),
                json!({
                    "bundle_id": bundle.id,
                    "exported_by": request.actor,
                }),
                &request.actor,
            )?;
        }

        let completed = lifecycle::bundle_completed(&bundle, packaged.locator, &self.clock.now())?;
        self.bundles
            .update_bundle(&completed, BundleStatus::Processing)?;
        self.journal.record(
            tx::BUNDLE_COMPLETED,
            completed.id.as_ref(),
            json!({
                "document_ids": completed.document_ids,
                "bundle_locator": completed.bundle_locator,
            }),
            &request.actor,
        )?;
        Ok(completed)
    }

    fn resolve_failed(
        &self,
        bundle: ExportBundle,
        actor: &ActorId,
        reason: &str,
    ) -> Result<ExportBundle, EngineError> {
        let failed = lifecycle::bundle_failed(&bundle)?;
        self.bundles.update_bundle(&failed, BundleStatus::Processing)?;
        self.journal.record(
            tx::BUNDLE_FAILED,
            failed.id.as_ref(),
            json!({ "reason": reason }),
            actor,
        )?;
        Ok(failed)
    }
}
