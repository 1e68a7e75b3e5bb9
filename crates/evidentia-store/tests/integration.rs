use evidentia_canonical::{
    sha256_hex, ActorId, AnomalyId, Canonicalizer, DocumentId, SellerId, TemplateVersion,
    Timestamp,
};
use evidentia_core::{compute_entry_hash, DocumentStatus, GeneratedArtifact};
use evidentia_store::{
    ArtifactStore, EntryQuery, FileJournal, JournalStore, MemoryStore, PendingEntry, StoreError,
};
use evidentia_journal::WriteOptions;
use serde_json::json;
use tempfile::TempDir;

fn artifact(id: &str, anomaly: &str, evidence: &str, generated_at: &str) -> GeneratedArtifact {
    GeneratedArtifact {
        id: DocumentId::new(id.into()),
        seller_id: SellerId::new("SELLER1".into()),
        anomaly_id: AnomalyId::new(anomaly.into()),
        template_version: TemplateVersion::parse("v1.0").unwrap(),
        evidence_hash: sha256_hex(evidence.as_bytes()),
        signature_hash: sha256_hex(format!("sig-{id}").as_bytes()),
        content_hash: sha256_hex(format!("content-{id}").as_bytes()),
        status: DocumentStatus::Draft,
        generated_at: Timestamp::parse(generated_at).unwrap(),
        locked_at: None,
        locked_by: None,
        exported_at: None,
        exported_by: None,
        export_bundle_id: None,
        artifact_locator: None,
        artifact_size: None,
    }
}

fn pending(tx_type: &str, entity: &str, second: u64) -> PendingEntry {
    let canonicalizer = Canonicalizer::default();
    let payload = json!({"entity": entity});
    let timestamp = Timestamp::parse(format!("2024-01-01T00:00:{:02}.000Z", second)).unwrap();
    let hash = compute_entry_hash(&canonicalizer, &payload, &timestamp).unwrap();
    PendingEntry {
        tx_type: tx_type.to_string(),
        entity_id: entity.to_string(),
        payload,
        timestamp,
        actor_id: ActorId::parse("service:worker").unwrap(),
        hash,
    }
}

#[test]
fn test_fingerprint_uniqueness_enforced() {
    let store = MemoryStore::new();
    store
        .insert_artifact(&artifact("doc-1", "anom-1", "ev", "2024-01-01T00:00:00.000Z"))
        .unwrap();

    // Same fingerprint tuple, different id.
    let err = store
        .insert_artifact(&artifact("doc-2", "anom-1", "ev", "2024-01-02T00:00:00.000Z"))
        .unwrap_err();
    match err {
        StoreError::DuplicateFingerprint { document_id } => {
            assert_eq!(document_id.as_ref(), "doc-1");
        }
        other => panic!("expected DuplicateFingerprint, got {other}"),
    }

    // Different evidence hash is a new logical artifact.
    store
        .insert_artifact(&artifact("doc-3", "anom-1", "ev2", "2024-01-03T00:00:00.000Z"))
        .unwrap();
}

#[test]
fn test_find_latest_by_scope() {
    let store = MemoryStore::new();
    store
        .insert_artifact(&artifact("doc-1", "anom-1", "ev1", "2024-01-01T00:00:00.000Z"))
        .unwrap();
    store
        .insert_artifact(&artifact("doc-2", "anom-1", "ev2", "2024-02-01T00:00:00.000Z"))
        .unwrap();
    store
        .insert_artifact(&artifact("doc-3", "anom-2", "ev3", "2024-03-01T00:00:00.000Z"))
        .unwrap();

    let latest = store
        .find_latest_by_scope(
            &SellerId::new("SELLER1".into()),
            &AnomalyId::new("anom-1".into()),
            &TemplateVersion::parse("v1.0").unwrap(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(latest.id.as_ref(), "doc-2");
}

#[test]
fn test_cas_update_rejects_stale_status() {
    let store = MemoryStore::new();
    let a = artifact("doc-1", "anom-1", "ev", "2024-01-01T00:00:00.000Z");
    store.insert_artifact(&a).unwrap();

    // First transition wins.
    let mut locked = a.clone();
    locked.status = DocumentStatus::Locked;
    store.update_artifact(&locked, DocumentStatus::Draft).unwrap();

    // Second racer with a stale expectation loses.
    let mut also_locked = a.clone();
    also_locked.status = DocumentStatus::Locked;
    let err = store
        .update_artifact(&also_locked, DocumentStatus::Draft)
        .unwrap_err();
    assert!(matches!(err, StoreError::StatusConflict { .. }));
}

#[test]
fn test_batch_update_is_all_or_nothing() {
    let store = MemoryStore::new();
    let a = artifact("doc-1", "anom-1", "ev1", "2024-01-01T00:00:00.000Z");
    let b = artifact("doc-2", "anom-2", "ev2", "2024-01-01T00:00:00.000Z");
    store.insert_artifact(&a).unwrap();
    store.insert_artifact(&b).unwrap();

    let mut a2 = a.clone();
    a2.status = DocumentStatus::Exported;
    let mut b2 = b.clone();
    b2.status = DocumentStatus::Exported;

    // Wrong expectation for b: the whole batch must fail.
    let err = store
        .update_artifacts(&[a2, b2], &[DocumentStatus::Draft, DocumentStatus::Locked])
        .unwrap_err();
    assert!(matches!(err, StoreError::StatusConflict { .. }));

    assert_eq!(
        store
            .get_artifact(&DocumentId::new("doc-1".into()))
            .unwrap()
            .unwrap()
            .status,
        DocumentStatus::Draft
    );
    assert_eq!(
        store
            .get_artifact(&DocumentId::new("doc-2".into()))
            .unwrap()
            .unwrap()
            .status,
        DocumentStatus::Draft
    );
}

#[test]
fn test_journal_ids_and_chain_are_monotonic() {
    let store = MemoryStore::new();
    let e1 = store.append_entry(pending("document_locked", "doc-1", 1)).unwrap();
    let e2 = store.append_entry(pending("document_locked", "doc-2", 2)).unwrap();
    let e3 = store.append_entry(pending("sync_warning", "doc-1", 3)).unwrap();

    assert_eq!((e1.id, e2.id, e3.id), (1, 2, 3));
    assert_eq!(e1.prev_hash, None);
    assert_eq!(e2.prev_hash, Some(e1.hash.clone()));
    assert_eq!(e3.prev_hash, Some(e2.hash.clone()));
}

#[test]
fn test_entries_are_never_mutated_across_reads() {
    let store = MemoryStore::new();
    let e1 = store.append_entry(pending("document_locked", "doc-1", 1)).unwrap();

    let first_read = store.get_entry(e1.id).unwrap().unwrap();
    store.append_entry(pending("sync_warning", "doc-1", 2)).unwrap();
    let second_read = store.get_entry(e1.id).unwrap().unwrap();

    assert_eq!(first_read, second_read);
    assert_eq!(first_read.hash, e1.hash);
}

#[test]
fn test_query_filters_and_order() {
    let store = MemoryStore::new();
    store.append_entry(pending("document_locked", "doc-1", 1)).unwrap();
    store.append_entry(pending("document_exported", "doc-1", 2)).unwrap();
    store.append_entry(pending("document_locked", "doc-2", 3)).unwrap();

    // Entity filter, newest first.
    let page = store
        .query_entries(&EntryQuery {
            entity_id: Some("doc-1".to_string()),
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);

    // Type filter.
    let page = store
        .query_entries(&EntryQuery {
            tx_type: Some("document_locked".to_string()),
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 1]);

    // Time range filter (inclusive bounds).
    let page = store
        .query_entries(&EntryQuery {
            after: Some(Timestamp::parse("2024-01-01T00:00:02.000Z").unwrap()),
            before: Some(Timestamp::parse("2024-01-01T00:00:03.000Z").unwrap()),
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[test]
fn test_cursor_pagination() {
    let store = MemoryStore::new();
    for i in 1..=5 {
        store.append_entry(pending("document_locked", "doc-1", i)).unwrap();
    }

    let first = store
        .query_entries(&EntryQuery {
            limit: Some(2),
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = first.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![5, 4]);
    assert_eq!(first.next_cursor, Some(4));

    let second = store
        .query_entries(&EntryQuery {
            limit: Some(2),
            cursor: first.next_cursor,
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = second.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2]);

    let last = store
        .query_entries(&EntryQuery {
            limit: Some(2),
            cursor: second.next_cursor,
            ..EntryQuery::default()
        })
        .unwrap();
    let ids: Vec<u64> = last.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(last.next_cursor, None);
}

#[test]
fn test_file_journal_persists_chain_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("audit.eaj");

    let (h1, h2) = {
        let journal = FileJournal::open(&path, WriteOptions::default()).unwrap();
        let e1 = journal.append_entry(pending("document_locked", "doc-1", 1)).unwrap();
        let e2 = journal.append_entry(pending("sync_warning", "doc-1", 2)).unwrap();
        assert_eq!(e2.prev_hash, Some(e1.hash.clone()));
        (e1.hash, e2.hash)
    };

    // Reopen: ids keep counting, the chain keeps linking.
    let journal = FileJournal::open(&path, WriteOptions::default()).unwrap();
    let e3 = journal.append_entry(pending("document_exported", "doc-1", 3)).unwrap();
    assert_eq!(e3.id, 3);
    assert_eq!(e3.prev_hash, Some(h2));

    let e1 = journal.get_entry(1).unwrap().unwrap();
    assert_eq!(e1.hash, h1);

    let page = journal.query_entries(&EntryQuery::default()).unwrap();
    let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}
