//! Service layer tying the Evidentia components together.
//!
//! This crate provides:
//! - Idempotent document generation behind a content-addressed resolver
//! - The lock/refresh lifecycle operations with compare-and-set persistence
//! - The hash-chained transaction journal service with cursor pagination
//! - The sync cross-check engine and seller-level rollups
//! - The export bundler with all-or-nothing member transitions
//!
//! Everything is explicit dependency injection: each service is built
//! from the store traits and collaborator interfaces it needs, with no
//! global state. The surrounding transport layer (HTTP, workers) maps
//! these calls and their typed errors onto its own wire formats.

#![deny(missing_docs)]

/// Export bundler.
pub mod bundler;
/// Wall-clock abstraction.
pub mod clock;
/// External collaborator interfaces (sync, rendering, packaging).
pub mod collaborators;
/// Sync cross-check engine.
pub mod crosscheck;
/// Document lifecycle service.
pub mod documents;
/// Engine error taxonomy.
pub mod error;
/// Idempotent document generation.
pub mod generation;
/// Transaction journal service.
pub mod journal;

pub use bundler::{BundleRequest, ExportBundler};
pub use clock::{Clock, SystemClock};
pub use collaborators::{
    BundlePackager, PackagedBundle, PackagingError, RenderError, RenderedArtifact, Renderer,
    SyncError, SyncProvider,
};
pub use crosscheck::{CrossCheckVerdict, SyncCrossCheck, SyncHealthMetrics, SyncSummary};
pub use documents::DocumentService;
pub use error::EngineError;
pub use generation::{
    GenerationOutcome, GenerationRequest, GenerationService, IdempotencyResolver, Resolution,
};
pub use journal::{TransactionJournal, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
