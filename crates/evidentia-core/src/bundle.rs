use evidentia_canonical::{ActorId, BundleId, DocumentId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an export bundle.
///
/// A bundle transitions Processing -> Completed or Processing -> Failed
/// exactly once; member documents flip to Exported only on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleStatus {
    /// Packaging is in flight.
    Processing,
    /// Packaging succeeded; members are Exported.
    Completed,
    /// Packaging failed; members were left untouched.
    Failed,
}

impl fmt::Display for BundleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleStatus::Processing => f.write_str("processing"),
            BundleStatus::Completed => f.write_str("completed"),
            BundleStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Physical packaging format for a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// One archive containing each rendered document.
    Archive,
    /// One merged document.
    Merged,
}

/// A named grouping of artifacts exported together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Opaque unique id.
    pub id: BundleId,
    /// Human-facing bundle name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Actor that requested the export.
    pub created_by: ActorId,
    /// Bundle status.
    pub status: BundleStatus,
    /// Member document ids.
    pub document_ids: Vec<DocumentId>,
    /// Packaging format.
    pub format: BundleFormat,
    /// Opaque object-storage locator for the packaged bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_locator: Option<String>,
    /// When the bundle was created.
    pub created_at: Timestamp,
    /// When the bundle resolved to Completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}
