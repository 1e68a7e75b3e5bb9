//! Transaction journal service.
//!
//! Thin layer over a [`JournalStore`] that stamps timestamps, computes
//! entry hashes, and enforces the pagination contract. Every other
//! service records its actions through this one.

use std::sync::Arc;

use evidentia_canonical::{ActorId, Canonicalizer};
use evidentia_core::{compute_entry_hash, TransactionJournalEntry};
use evidentia_store::{EntryQuery, JournalStore, PendingEntry, QueryPage};
use serde_json::Value;

use crate::clock::Clock;
use crate::error::EngineError;

/// Page size applied when a query does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Hard page-size ceiling; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 200;

/// Records and queries hash-chained journal entries.
#[derive(Clone)]
pub struct TransactionJournal {
    store: Arc<dyn JournalStore>,
    canonicalizer: Canonicalizer,
    clock: Arc<dyn Clock>,
}

impl TransactionJournal {
    /// Creates a journal service over the given store.
    pub fn new(
        store: Arc<dyn JournalStore>,
        canonicalizer: Canonicalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            canonicalizer,
            clock,
        }
    }

    /// Records one state-changing action.
    ///
    /// The timestamp is taken here so the hash covers exactly what gets
    /// persisted; id and prev-hash assignment happen inside the store's
    /// append lock.
    pub fn record(
        &self,
        tx_type: &str,
        entity_id: &str,
        payload: Value,
        actor: &ActorId,
    ) -> Result<TransactionJournalEntry, EngineError> {
        let timestamp = self.clock.now();
        let hash = compute_entry_hash(&self.canonicalizer, &payload, &timestamp)?;
        let entry = self.store.append_entry(PendingEntry {
            tx_type: tx_type.to_string(),
            entity_id: entity_id.to_string(),
            payload,
            timestamp,
            actor_id: actor.clone(),
            hash,
        })?;
        Ok(entry)
    }

    /// Queries entries newest-first with cursor pagination.
    ///
    /// The limit is clamped to `[1, MAX_PAGE_SIZE]` and defaults to
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn entries(&self, mut query: EntryQuery) -> Result<QueryPage, EngineError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        query.limit = Some(limit);
        Ok(self.store.query_entries(&query)?)
    }

    /// Fetches one entry by id.
    pub fn entry(&self, id: u64) -> Result<TransactionJournalEntry, EngineError> {
        self.store.get_entry(id)?.ok_or(EngineError::NotFound {
            kind: "journal entry",
            id: id.to_string(),
        })
    }

    /// Returns the complete history for one entity, newest first.
    pub fn audit_trail(
        &self,
        entity_id: &str,
    ) -> Result<Vec<TransactionJournalEntry>, EngineError> {
        let mut trail = Vec::new();
        let mut cursor = None;
        loop {
            let page = self.entries(EntryQuery {
                entity_id: Some(entity_id.to_string()),
                cursor,
                limit: Some(MAX_PAGE_SIZE),
                ..EntryQuery::default()
            })?;
            trail.extend(page.items);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(trail)
    }
}
