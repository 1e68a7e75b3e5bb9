use evidentia_canonical::{BundleId, DocumentId};
use thiserror::Error;

use crate::bundle::BundleStatus;
use crate::document::DocumentStatus;

/// Lifecycle guard violations.
///
/// These are surfaced to the caller as-is and never coerced into a
/// different outcome; the losing side of a race observes one of these
/// rather than a silent overwrite.
#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    /// Lock was requested on an already-locked artifact.
    #[error("document {document_id} is already locked")]
    AlreadyLocked {
        /// Artifact that was already locked.
        document_id: DocumentId,
    },
    /// A mutation was attempted on a Locked or Exported artifact.
    #[error("document {document_id} is immutable (status: {status})")]
    ImmutableDocument {
        /// Artifact that is immutable.
        document_id: DocumentId,
        /// Status that makes it immutable.
        status: DocumentStatus,
    },
    /// A transition outside the Draft -> Locked -> Exported lattice.
    #[error("document {document_id} cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Artifact in question.
        document_id: DocumentId,
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },
    /// One or more bundle members are not eligible for export.
    #[error("documents are not exportable: {document_ids:?}")]
    NotExportable {
        /// Offending document ids.
        document_ids: Vec<DocumentId>,
    },
    /// A bundle already resolved to Completed or Failed.
    #[error("bundle {bundle_id} already resolved (status: {status})")]
    BundleAlreadyResolved {
        /// Bundle in question.
        bundle_id: BundleId,
        /// Current terminal status.
        status: BundleStatus,
    },
}
