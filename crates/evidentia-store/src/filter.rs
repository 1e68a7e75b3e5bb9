//! Entry filtering and pagination over journal entries.

use evidentia_canonical::{ActorId, Timestamp};
use evidentia_core::TransactionJournalEntry;

use crate::traits::{EntryQuery, QueryPage};

/// Trait for filtering entries during iteration.
pub trait EntryFilter {
    /// Returns true if the entry matches the filter criteria.
    fn matches(&self, entry: &TransactionJournalEntry) -> bool;
}

/// Filter by tx type.
#[derive(Debug, Clone)]
pub struct TxTypeFilter {
    /// Tx type to match (e.g., "document_locked").
    pub tx_type: String,
}

impl EntryFilter for TxTypeFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        entry.tx_type == self.tx_type
    }
}

/// Filter by entity id.
#[derive(Debug, Clone)]
pub struct EntityFilter {
    /// Entity id to match.
    pub entity_id: String,
}

impl EntryFilter for EntityFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        entry.entity_id == self.entity_id
    }
}

/// Filter by actor id.
#[derive(Debug, Clone)]
pub struct ActorFilter {
    /// Actor id to match.
    pub actor_id: ActorId,
}

impl EntryFilter for ActorFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        entry.actor_id == self.actor_id
    }
}

/// Filter by time range (both bounds inclusive).
#[derive(Debug, Clone)]
pub struct TimeRangeFilter {
    /// Include entries at or after this timestamp.
    pub after: Option<Timestamp>,
    /// Include entries at or before this timestamp.
    pub before: Option<Timestamp>,
}

impl EntryFilter for TimeRangeFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        if let Some(ref after) = self.after {
            if entry.timestamp < *after {
                return false;
            }
        }
        if let Some(ref before) = self.before {
            if entry.timestamp > *before {
                return false;
            }
        }
        true
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn EntryFilter>>,
}

impl EntryFilter for AndFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        self.filters.iter().all(|f| f.matches(entry))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn EntryFilter>>,
}

impl EntryFilter for OrFilter {
    fn matches(&self, entry: &TransactionJournalEntry) -> bool {
        self.filters.iter().any(|f| f.matches(entry))
    }
}

/// Builds the AND filter implied by a query's restriction fields.
fn filter_for_query(query: &EntryQuery) -> AndFilter {
    let mut filters: Vec<Box<dyn EntryFilter>> = Vec::new();
    if let Some(tx_type) = &query.tx_type {
        filters.push(Box::new(TxTypeFilter {
            tx_type: tx_type.clone(),
        }));
    }
    if let Some(entity_id) = &query.entity_id {
        filters.push(Box::new(EntityFilter {
            entity_id: entity_id.clone(),
        }));
    }
    if let Some(actor_id) = &query.actor_id {
        filters.push(Box::new(ActorFilter {
            actor_id: actor_id.clone(),
        }));
    }
    if query.after.is_some() || query.before.is_some() {
        filters.push(Box::new(TimeRangeFilter {
            after: query.after.clone(),
            before: query.before.clone(),
        }));
    }
    AndFilter { filters }
}

/// Applies a query to entries sorted ascending by id.
///
/// Pages run newest-first; the cursor is the id of the last item of the
/// previous page, exclusive. The limit is taken as-is — clamping to the
/// [1,200] contract is the journal service's job.
pub fn paginate(entries: &[TransactionJournalEntry], query: &EntryQuery) -> QueryPage {
    let filter = filter_for_query(query);
    let limit = query.limit.unwrap_or(50);

    let mut items = Vec::with_capacity(limit);
    let mut more = false;
    for entry in entries.iter().rev() {
        if let Some(cursor) = query.cursor {
            if entry.id >= cursor {
                continue;
            }
        }
        if !filter.matches(entry) {
            continue;
        }
        if items.len() == limit {
            more = true;
            break;
        }
        items.push(entry.clone());
    }

    let next_cursor = if more {
        items.last().map(|e| e.id)
    } else {
        None
    };

    QueryPage { items, next_cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_canonical::sha256_hex;
    use serde_json::json;

    fn entry(id: u64, tx_type: &str, entity: &str, actor: &str) -> TransactionJournalEntry {
        TransactionJournalEntry {
            id,
            tx_type: tx_type.to_string(),
            entity_id: entity.to_string(),
            payload: json!({"n": id}),
            timestamp: Timestamp::new(format!("2024-01-01T00:00:{:02}.000Z", id)),
            actor_id: ActorId::parse(actor).unwrap(),
            hash: sha256_hex(format!("entry-{id}").as_bytes()),
            prev_hash: None,
        }
    }

    #[test]
    fn or_filter_matches_any_branch() {
        let filter = OrFilter {
            filters: vec![
                Box::new(EntityFilter {
                    entity_id: "doc-1".to_string(),
                }),
                Box::new(EntityFilter {
                    entity_id: "doc-2".to_string(),
                }),
            ],
        };
        assert!(filter.matches(&entry(1, "document_locked", "doc-1", "user:u1")));
        assert!(filter.matches(&entry(2, "document_locked", "doc-2", "user:u1")));
        assert!(!filter.matches(&entry(3, "document_locked", "doc-3", "user:u1")));
    }

    #[test]
    fn filters_compose_by_nesting() {
        // Lock entries touching either of two documents.
        let filter = AndFilter {
            filters: vec![
                Box::new(TxTypeFilter {
                    tx_type: "document_locked".to_string(),
                }),
                Box::new(OrFilter {
                    filters: vec![
                        Box::new(EntityFilter {
                            entity_id: "doc-1".to_string(),
                        }),
                        Box::new(EntityFilter {
                            entity_id: "doc-2".to_string(),
                        }),
                    ],
                }),
            ],
        };
        assert!(filter.matches(&entry(1, "document_locked", "doc-1", "user:u1")));
        assert!(!filter.matches(&entry(2, "document_generated", "doc-1", "user:u1")));
        assert!(!filter.matches(&entry(3, "document_locked", "doc-9", "user:u1")));
    }

    #[test]
    fn empty_or_filter_matches_nothing() {
        let filter = OrFilter {
            filters: Vec::new(),
        };
        assert!(!filter.matches(&entry(1, "document_locked", "doc-1", "user:u1")));
    }
}
