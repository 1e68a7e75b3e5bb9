//! External collaborator interfaces.
//!
//! The engine never talks to object storage, PDF rendering, or the sync
//! pipeline directly; it consumes these narrow traits and stores only the
//! opaque locators they return. Production wiring implements them over
//! the real services; tests implement them inline.

use evidentia_canonical::{AnomalyId, SellerId, TemplateVersion};
use evidentia_core::{ExportBundle, GeneratedArtifact, SyncSnapshot};
use serde_json::Value;
use thiserror::Error;

/// The sync data provider could not be reached.
#[derive(Debug, Error)]
#[error("sync provider error: {0}")]
pub struct SyncError(pub String);

/// Supplies the latest per-seller anomaly snapshot.
///
/// `Ok(None)` means the provider is healthy but has no snapshot for the
/// seller; `Err` means the provider itself is unreachable. The two are
/// reported differently by the cross-check engine.
pub trait SyncProvider: Send + Sync {
    /// Returns the most recent snapshot for a seller, if any.
    fn latest_snapshot(&self, seller_id: &SellerId) -> Result<Option<SyncSnapshot>, SyncError>;
}

/// The rendering service failed to produce document bytes.
#[derive(Debug, Error)]
#[error("render error: {0}")]
pub struct RenderError(pub String);

/// Result of rendering one document.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    /// Opaque object-storage key for the rendered bytes.
    pub locator: String,
    /// Size of the rendered bytes.
    pub size_bytes: u64,
}

/// Produces document bytes from evidence.
///
/// Called only after the idempotency resolver confirms the request is
/// new; the engine stores the locator and size, never the bytes.
pub trait Renderer: Send + Sync {
    /// Renders a document for the given scope and evidence payload.
    fn render(
        &self,
        seller_id: &SellerId,
        anomaly_id: &AnomalyId,
        template_version: &TemplateVersion,
        evidence: &Value,
    ) -> Result<RenderedArtifact, RenderError>;
}

/// Packaging the bundle blob failed.
#[derive(Debug, Error)]
#[error("packaging error: {0}")]
pub struct PackagingError(pub String);

/// Result of packaging one bundle.
#[derive(Debug, Clone)]
pub struct PackagedBundle {
    /// Opaque object-storage key for the packaged blob.
    pub locator: String,
    /// Size of the packaged blob.
    pub size_bytes: u64,
}

/// Assembles member documents into one downloadable blob.
pub trait BundlePackager: Send + Sync {
    /// Packages the bundle's member documents.
    fn package(
        &self,
        bundle: &ExportBundle,
        documents: &[GeneratedArtifact],
    ) -> Result<PackagedBundle, PackagingError>;
}
