use evidentia_canonical::{ActorId, Canonicalizer, Timestamp};
use evidentia_core::{compute_entry_hash, TransactionJournalEntry};
use evidentia_journal::frame::{FRAME_HEADER_SIZE, HEADER_SIZE, MAX_PAYLOAD_SIZE};
use evidentia_journal::{EntryJson, FrameKind, JournalReader, JournalWriter, ReadMode, WriteOptions};
use serde_json::json;
use std::fs;
use std::io::{Seek, Write};
use tempfile::TempDir;

fn make_test_entry(id: u64) -> EntryJson {
    let canonicalizer = Canonicalizer::default();
    let payload = json!({"note": format!("entry-{id}")});
    let timestamp = Timestamp::parse(format!("2024-01-01T00:00:{:02}.000Z", id)).unwrap();
    let hash = compute_entry_hash(&canonicalizer, &payload, &timestamp).unwrap();
    serde_json::to_value(TransactionJournalEntry {
        id,
        tx_type: "document_locked".to_string(),
        entity_id: format!("doc-{id}"),
        payload,
        timestamp,
        actor_id: ActorId::parse("user:tester").unwrap(),
        hash,
        prev_hash: None,
    })
    .unwrap()
}

#[test]
fn test_payload_size_limit() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    let oversized_payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    let result = writer.append_raw(FrameKind::EntryJson, &oversized_payload);

    match result.unwrap_err() {
        evidentia_journal::JournalError::PayloadTooLarge { size, max } => {
            assert_eq!(size, MAX_PAYLOAD_SIZE + 1);
            assert_eq!(max, MAX_PAYLOAD_SIZE);
        }
        other => panic!("expected PayloadTooLarge, got {other}"),
    }
}

#[test]
fn test_frame_reserved_bytes_must_be_zero() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_test_entry(1)).unwrap();
        writer.finish().unwrap();
    }

    // Corrupt the first reserved byte of the first frame header.
    let mut file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.seek(std::io::SeekFrom::Start(16 + 1)).unwrap();
    file.write_all(&[0x01]).unwrap();
    drop(file);

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(reader.read_frame().is_err());
}

#[test]
fn test_header_reserved_bytes_must_be_zero() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_test_entry(1)).unwrap();
        writer.finish().unwrap();
    }

    let mut file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.seek(std::io::SeekFrom::Start(8)).unwrap();
    file.write_all(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08])
        .unwrap();
    drop(file);

    assert!(JournalReader::open(&journal_path, ReadMode::Strict).is_err());
}

#[test]
fn test_partial_write_handling() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_test_entry(1)).unwrap();
        writer.append_entry(&make_test_entry(2)).unwrap();
        writer.finish().unwrap();
    }

    // Truncate 10 bytes into the second frame.
    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let entry1 = reader.read_entry().unwrap().unwrap();
    assert_eq!(entry1["id"], 1);
    let truncate_at = reader.position() + 10;

    let file = fs::OpenOptions::new()
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.set_len(truncate_at).unwrap();
    drop(file);

    // Strict mode errors on the truncated second entry.
    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
        assert!(reader.read_entry().unwrap().is_some());
        assert!(reader.read_entry().is_err());
    }

    // Permissive mode treats truncation as end-of-file.
    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
        assert!(reader.read_entry().unwrap().is_some());
        assert!(reader.read_entry().unwrap().is_none());
    }
}

#[test]
fn test_flipped_payload_byte_fails_checksum() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_test_entry(1)).unwrap();
        writer.finish().unwrap();
    }

    // Flip one byte inside the first frame's payload.
    let mut bytes = fs::read(&journal_path).unwrap();
    let target = HEADER_SIZE + FRAME_HEADER_SIZE + 4;
    bytes[target] ^= 0xFF;
    fs::write(&journal_path, &bytes).unwrap();

    // The checksum catches the edit in both modes, before JSON parsing.
    for mode in [ReadMode::Strict, ReadMode::Permissive] {
        let mut reader = JournalReader::open(&journal_path, mode).unwrap();
        match reader.read_entry().unwrap_err() {
            evidentia_journal::JournalError::ChecksumMismatch { offset } => {
                assert_eq!(offset, HEADER_SIZE as u64);
            }
            other => panic!("expected ChecksumMismatch, got {other}"),
        }
    }
}

#[test]
fn test_unknown_frame_kind_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.eaj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        // Unknown frame first, then a real entry.
        writer
            .append_raw(FrameKind::Unknown(0x7F), b"side-channel")
            .unwrap();
        writer.append_entry(&make_test_entry(1)).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let entry = reader.read_entry().unwrap().unwrap();
    assert_eq!(entry["id"], 1);
    assert!(reader.read_entry().unwrap().is_none());
}
