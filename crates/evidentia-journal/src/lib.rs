//! Append-only audit journal file format for Evidentia transaction entries.
//!
//! This crate provides:
//! - Framed, append-only storage for transaction journal entry JSON (`.eaj`),
//!   with a per-frame payload checksum that surfaces corruption at read time
//! - Reader/writer APIs with strict and permissive modes
//! - Verification of entry hashes and the prev-hash chain
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evidentia_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
//! use serde_json::json;
//!
//! let entry = json!({
//!     "id": 1,
//!     "tx_type": "document_locked",
//!     "entity_id": "doc-1a2b3c4d",
//!     "payload": {"locked_by": "user:alice"},
//!     "timestamp": "2024-01-01T00:00:00.000Z",
//!     "actor_id": "user:alice",
//!     "hash": "0000000000000000000000000000000000000000000000000000000000000000"
//! });
//!
//! let mut writer = JournalWriter::open("audit.eaj", WriteOptions::default())?;
//! writer.append_entry(&entry)?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open("audit.eaj", ReadMode::Strict)?;
//! while let Some(read_entry) = reader.read_entry()? {
//!     println!("entry {}", read_entry["id"]);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Entries are never rewritten in place; an `.eaj` file only ever grows,
//! and the prev-hash chain makes out-of-band edits detectable.

#![deny(missing_docs)]

/// Entry JSON type alias and helpers.
pub mod entry;
/// Error types for journal operations.
pub mod errors;
/// Frame structure and serialization.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Verification helpers for journal entries.
pub mod verification;
/// Journal writer implementation.
pub mod writer;

pub use entry::EntryJson;
pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use reader::{JournalReader, ReadMode};
pub use verification::{verify_chain, verify_entry, ChainVerifier};
pub use writer::{JournalWriter, WriteOptions};
