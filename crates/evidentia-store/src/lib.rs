//! Pluggable storage backend abstraction for Evidentia records.
//!
//! This crate provides:
//! - Narrow `ArtifactStore` / `BundleStore` / `JournalStore` traits exposing
//!   only the operations the engine requires, implementable over any
//!   relational or document store
//! - The fingerprint uniqueness constraint and compare-and-set status
//!   transitions the engine relies on for single-writer guarantees
//! - A composable entry filter API and reverse-chronological cursor
//!   pagination over journal entries
//! - An in-memory reference backend and a journal-file-backed `JournalStore`

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Journal-file-backed journal store.
pub mod file_journal;
/// Entry filtering and pagination API.
pub mod filter;
/// In-memory reference backend.
pub mod memory;
/// Storage backend traits.
pub mod traits;

pub use error::StoreError;
pub use file_journal::FileJournal;
pub use filter::{
    paginate, ActorFilter, AndFilter, EntityFilter, EntryFilter, OrFilter, TimeRangeFilter,
    TxTypeFilter,
};
pub use memory::MemoryStore;
pub use traits::{
    ArtifactStore, BundleStore, EntryQuery, JournalStore, PendingEntry, QueryPage,
};
