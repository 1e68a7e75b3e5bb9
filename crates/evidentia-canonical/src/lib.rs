//! Canonicalization and content-addressing primitives for Evidentia.
//!
//! Every field that participates in hashing, duplicate detection, or
//! tamper-evidence lives behind this crate: deterministic serialization
//! with ephemeral-field scrubbing, SHA-256 hex digests, and the validated
//! identifier newtypes shared by the rest of the workspace.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Digest primitives and hashing helpers.
pub mod digest;
/// Hygiene report types emitted during canonicalization.
pub mod hygiene;
/// Core identifiers and newtypes.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{
    CanonicalizationError, CanonicalizationResult, Canonicalizer, EPHEMERAL_PREFIX,
};
pub use digest::{sha256_hex, Digest, SHORT_HASH_LEN};
pub use hygiene::{HygieneReport, HygieneStatus};
pub use identifiers::{
    ActorId, AnomalyId, BundleId, DocumentId, ProfileId, SellerId, TemplateVersion, Timestamp,
};
pub use validation::ValidationError;
