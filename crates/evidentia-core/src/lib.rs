//! Data model, lifecycle rules, and fingerprinting for Evidentia documents.
//!
//! This crate provides:
//! - Record types for generated artifacts, export bundles, and journal entries
//! - Content-addressed fingerprint computation (evidence/signature/content hashes)
//! - The strict forward-only document lifecycle (Draft -> Locked -> Exported)
//!   expressed as pure transition functions
//! - Journal-entry hash computation and verification
//!
//! Core invariants:
//! - A fingerprint tuple `(seller, anomaly, template_version, evidence_hash)`
//!   identifies exactly one logical artifact
//! - Once Locked or Exported, content-addressed fields never change
//! - Journal entries are immutable, append-only evidence records
//! - Core holds no storage and performs no I/O; it only decides legality
//!
#![deny(missing_docs)]

/// Export bundle record and transitions.
pub mod bundle;
/// Generated artifact record and status.
pub mod document;
/// Journal entry type, tx-type tags, and entry hashing.
pub mod entry;
/// Lifecycle error taxonomy.
pub mod errors;
/// Content-addressed fingerprint computation.
pub mod fingerprint;
/// Pure lifecycle transition functions.
pub mod lifecycle;
/// External sync snapshot types and snapshot hashing.
pub mod sync;

pub use bundle::{BundleFormat, BundleStatus, ExportBundle};
pub use document::{DocumentStatus, GeneratedArtifact};
pub use entry::{compute_entry_hash, verify_entry_hash, TransactionJournalEntry};
pub use errors::LifecycleError;
pub use fingerprint::{compute_signature_hash, Fingerprint};
pub use sync::{snapshot_content_hash, Severity, SyncAnomaly, SyncSnapshot};
