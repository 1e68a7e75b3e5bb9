//! Journal writer implementation.

use crate::entry::{is_valid_entry_structure, EntryJson};
use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to append to an existing file (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Journal writer for append-only entry storage.
///
/// The writer appends entries to a journal file (`.eaj` format) in a framed,
/// append-only manner. Entries are stored as JSON objects within record
/// frames; the file is never rewritten in place.
///
/// # Example
///
/// ```rust,no_run
/// use evidentia_journal::{JournalWriter, WriteOptions};
/// use serde_json::json;
///
/// let entry = json!({
///     "id": 1,
///     "tx_type": "document_locked",
///     "entity_id": "doc-1a2b3c4d",
///     "payload": {"locked_by": "user:alice"},
///     "timestamp": "2024-01-01T00:00:00.000Z",
///     "actor_id": "user:alice",
///     "hash": "0000000000000000000000000000000000000000000000000000000000000000"
/// });
///
/// let mut writer = JournalWriter::open("audit.eaj", WriteOptions::default())?;
/// writer.append_entry(&entry)?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: File,
    sync: bool,
    header_written: bool,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// If the file doesn't exist and `options.create` is `true`, a new journal
    /// file is created with a header. If the file exists, its header is
    /// validated and the writer seeks to the end (if `options.append`) or
    /// truncates everything after the header (if not).
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] if the file cannot be opened/created, or an
    /// existing file is not a valid journal.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path)?;

        let mut writer = Self {
            file,
            sync: options.sync,
            header_written: false,
        };

        let metadata = writer.file.metadata()?;
        if metadata.len() == 0 {
            writer.write_header()?;
        } else if metadata.len() < JournalHeader::HEADER_SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            // Validate that the existing file is a journal before appending.
            let mut header_bytes = [0u8; JournalHeader::HEADER_SIZE];
            writer.file.seek(io::SeekFrom::Start(0))?;
            writer.file.read_exact(&mut header_bytes)?;
            JournalHeader::from_bytes(&header_bytes)?;
            writer.header_written = true;
            if options.append {
                writer.file.seek(io::SeekFrom::End(0))?;
            } else {
                writer.file.set_len(JournalHeader::HEADER_SIZE as u64)?;
                writer
                    .file
                    .seek(io::SeekFrom::Start(JournalHeader::HEADER_SIZE as u64))?;
            }
        }

        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), JournalError> {
        let header = JournalHeader::new();
        self.file.write_all(&header.to_bytes())?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Appends a journal entry JSON payload.
    ///
    /// The entry must have the structural shape of a
    /// `TransactionJournalEntry` (id, tx_type, entity_id, payload, timestamp,
    /// actor_id, hash); hash correctness is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] if the entry is structurally invalid, JSON
    /// serialization fails, or an I/O error occurs.
    pub fn append_entry(&mut self, entry: &EntryJson) -> Result<(), JournalError> {
        if !is_valid_entry_structure(entry) {
            return Err(JournalError::InvalidEntry(
                "missing required entry fields".to_string(),
            ));
        }
        let json_bytes = serde_json::to_vec(entry)?;
        self.append_raw(FrameKind::EntryJson, &json_bytes)
    }

    /// Appends a raw frame with the given kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        if !self.header_written {
            return Err(JournalError::InvalidHeader(
                "header not written".to_string(),
            ));
        }

        let frame = RecordFrame::for_payload(kind, payload)?;
        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(payload)?;
        self.file.flush()?;

        if self.sync {
            self.file.sync_all()?;
        }

        Ok(())
    }

    /// Finishes writing and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
