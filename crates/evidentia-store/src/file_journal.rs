//! Journal-file-backed journal store.
//!
//! Persists entries in the framed `.eaj` format. Appends open the file in
//! append mode and extend the prev-hash chain; queries re-scan the file.
//! This is the durable reference backend — a database-backed
//! implementation of [`JournalStore`] would replace it wholesale.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use evidentia_canonical::Digest;
use evidentia_core::TransactionJournalEntry;
use evidentia_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};

use crate::error::StoreError;
use crate::filter::paginate;
use crate::traits::{EntryQuery, JournalStore, PendingEntry, QueryPage};

struct Tail {
    next_id: u64,
    last_hash: Option<Digest>,
}

/// Journal store persisting entries to a single `.eaj` file.
pub struct FileJournal {
    path: PathBuf,
    options: WriteOptions,
    tail: Mutex<Tail>,
}

impl FileJournal {
    /// Opens (or creates) a file-backed journal.
    ///
    /// An existing file is scanned once to recover the id sequence and the
    /// chain tail; a corrupt or truncated file is rejected here rather than
    /// surfacing as a broken chain later.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut tail = Tail {
            next_id: 1,
            last_hash: None,
        };

        if path.exists() {
            for entry in Self::scan(&path)? {
                tail.next_id = entry.id + 1;
                tail.last_hash = Some(entry.hash.clone());
            }
        } else {
            // Create the header eagerly so open failures surface here.
            let writer = JournalWriter::open(&path, options.clone())?;
            writer.finish()?;
        }

        Ok(Self {
            path,
            options,
            tail: Mutex::new(tail),
        })
    }

    fn scan(path: &Path) -> Result<Vec<TransactionJournalEntry>, StoreError> {
        let mut reader = JournalReader::open(path, ReadMode::Strict)?;
        let mut entries = Vec::new();
        while let Some(json) = reader.read_entry()? {
            let entry: TransactionJournalEntry = serde_json::from_value(json)?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl JournalStore for FileJournal {
    fn append_entry(
        &self,
        pending: PendingEntry,
    ) -> Result<TransactionJournalEntry, StoreError> {
        let mut tail = self
            .tail
            .lock()
            .map_err(|_| StoreError::Backend("journal lock poisoned".to_string()))?;

        let entry = TransactionJournalEntry {
            id: tail.next_id,
            tx_type: pending.tx_type,
            entity_id: pending.entity_id,
            payload: pending.payload,
            timestamp: pending.timestamp,
            actor_id: pending.actor_id,
            hash: pending.hash,
            prev_hash: tail.last_hash.clone(),
        };

        let mut writer = JournalWriter::open(&self.path, self.options.clone())?;
        writer.append_entry(&serde_json::to_value(&entry)?)?;
        writer.finish()?;

        tail.next_id = entry.id + 1;
        tail.last_hash = Some(entry.hash.clone());
        Ok(entry)
    }

    fn get_entry(&self, id: u64) -> Result<Option<TransactionJournalEntry>, StoreError> {
        Ok(Self::scan(&self.path)?.into_iter().find(|e| e.id == id))
    }

    fn query_entries(&self, query: &EntryQuery) -> Result<QueryPage, StoreError> {
        let entries = Self::scan(&self.path)?;
        Ok(paginate(&entries, query))
    }
}
