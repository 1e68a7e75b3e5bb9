use evidentia_canonical::{
    ActorId, AnomalyId, BundleId, Digest, DocumentId, SellerId, TemplateVersion, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fingerprint::Fingerprint;

/// Lifecycle status of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Mutable working state; content hash may still be refreshed.
    Draft,
    /// Content-addressed fields are frozen; metadata reads only.
    Locked,
    /// Terminal state; the artifact left the system in a bundle.
    Exported,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Draft => f.write_str("draft"),
            DocumentStatus::Locked => f.write_str("locked"),
            DocumentStatus::Exported => f.write_str("exported"),
        }
    }
}

/// One produced cost-documentation output.
///
/// Identity is content-addressed: `evidence_hash` fingerprints the canonical
/// evidence payload, `signature_hash` binds it to the template version and
/// generation time, and `content_hash` tracks the latest synced state for
/// drift detection. The storage pointer is owned by the object-storage
/// collaborator; this record only references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Opaque unique id.
    pub id: DocumentId,
    /// Seller that owns the documented anomaly.
    pub seller_id: SellerId,
    /// Anomaly this document substantiates.
    pub anomaly_id: AnomalyId,
    /// Template version the document was rendered with.
    pub template_version: TemplateVersion,
    /// Hash of the canonicalized evidence payload.
    pub evidence_hash: Digest,
    /// Hash binding evidence_hash + template_version + generated_at.
    pub signature_hash: Digest,
    /// Hash of the artifact's current synced state; used by cross-check.
    pub content_hash: Digest,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// When the artifact was generated.
    pub generated_at: Timestamp,
    /// When the artifact was locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_at: Option<Timestamp>,
    /// Who locked the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_by: Option<ActorId>,
    /// When the artifact was exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<Timestamp>,
    /// Who exported the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_by: Option<ActorId>,
    /// Bundle the artifact was exported in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_bundle_id: Option<BundleId>,
    /// Opaque object-storage locator for the rendered bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_locator: Option<String>,
    /// Size of the rendered bytes, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_size: Option<u64>,
}

impl GeneratedArtifact {
    /// Returns the uniqueness fingerprint tuple for this artifact.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            seller_id: self.seller_id.clone(),
            anomaly_id: self.anomaly_id.clone(),
            template_version: self.template_version.clone(),
            evidence_hash: self.evidence_hash.clone(),
        }
    }

    /// True once content-addressed fields may no longer change.
    pub fn is_immutable(&self) -> bool {
        matches!(self.status, DocumentStatus::Locked | DocumentStatus::Exported)
    }

    /// True if the artifact is eligible for export bundling.
    pub fn is_exportable(&self) -> bool {
        matches!(self.status, DocumentStatus::Draft | DocumentStatus::Locked)
    }
}
