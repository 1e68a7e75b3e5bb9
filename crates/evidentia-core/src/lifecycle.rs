//! Pure lifecycle transition functions.
//!
//! The state machine is a strict forward-only lattice:
//! Draft -> Locked -> Exported, with no unlock or unexport. Each function
//! takes the current record plus the caller's actor/clock context and
//! returns either the updated record or a typed guard violation. Persistence
//! and journaling are the caller's job; nothing here touches storage.

use evidentia_canonical::{ActorId, BundleId, Digest, Timestamp};

use crate::bundle::{BundleStatus, ExportBundle};
use crate::document::{DocumentStatus, GeneratedArtifact};
use crate::errors::LifecycleError;

/// Locks a Draft artifact, freezing its content-addressed fields.
pub fn lock(
    artifact: &GeneratedArtifact,
    actor: &ActorId,
    now: &Timestamp,
) -> Result<GeneratedArtifact, LifecycleError> {
    match artifact.status {
        DocumentStatus::Draft => {
            let mut updated = artifact.clone();
            updated.status = DocumentStatus::Locked;
            updated.locked_at = Some(now.clone());
            updated.locked_by = Some(actor.clone());
            Ok(updated)
        }
        DocumentStatus::Locked => Err(LifecycleError::AlreadyLocked {
            document_id: artifact.id.clone(),
        }),
        DocumentStatus::Exported => Err(LifecycleError::InvalidTransition {
            document_id: artifact.id.clone(),
            from: DocumentStatus::Exported,
            to: DocumentStatus::Locked,
        }),
    }
}

/// Applies a refreshed content hash to a Draft artifact.
///
/// Refresh never touches `evidence_hash` or `signature_hash`; once the
/// artifact is Locked or Exported it fails with `ImmutableDocument` so that
/// drift detection can never silently rewrite an immutable record.
pub fn refreshed(
    artifact: &GeneratedArtifact,
    content_hash: Digest,
) -> Result<GeneratedArtifact, LifecycleError> {
    if artifact.is_immutable() {
        return Err(LifecycleError::ImmutableDocument {
            document_id: artifact.id.clone(),
            status: artifact.status,
        });
    }
    let mut updated = artifact.clone();
    updated.content_hash = content_hash;
    Ok(updated)
}

/// Flips a Draft or Locked artifact to Exported with bundle stamps.
pub fn exported(
    artifact: &GeneratedArtifact,
    bundle_id: &BundleId,
    actor: &ActorId,
    now: &Timestamp,
) -> Result<GeneratedArtifact, LifecycleError> {
    if !artifact.is_exportable() {
        return Err(LifecycleError::NotExportable {
            document_ids: vec![artifact.id.clone()],
        });
    }
    let mut updated = artifact.clone();
    updated.status = DocumentStatus::Exported;
    updated.exported_at = Some(now.clone());
    updated.exported_by = Some(actor.clone());
    updated.export_bundle_id = Some(bundle_id.clone());
    Ok(updated)
}

/// Resolves a Processing bundle to Completed.
pub fn bundle_completed(
    bundle: &ExportBundle,
    locator: String,
    now: &Timestamp,
) -> Result<ExportBundle, LifecycleError> {
    ensure_processing(bundle)?;
    let mut updated = bundle.clone();
    updated.status = BundleStatus::Completed;
    updated.bundle_locator = Some(locator);
    updated.completed_at = Some(now.clone());
    Ok(updated)
}

/// Resolves a Processing bundle to Failed.
pub fn bundle_failed(bundle: &ExportBundle) -> Result<ExportBundle, LifecycleError> {
    ensure_processing(bundle)?;
    let mut updated = bundle.clone();
    updated.status = BundleStatus::Failed;
    Ok(updated)
}

fn ensure_processing(bundle: &ExportBundle) -> Result<(), LifecycleError> {
    if bundle.status != BundleStatus::Processing {
        return Err(LifecycleError::BundleAlreadyResolved {
            bundle_id: bundle.id.clone(),
            status: bundle.status,
        });
    }
    Ok(())
}
