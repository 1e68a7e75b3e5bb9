use serde_json::Value;

/// Entry JSON payload type.
///
/// This is a type alias for `serde_json::Value` representing one serialized
/// `TransactionJournalEntry`. The journal stores these as-is; hash
/// verification happens via [`crate::verification`].
pub type EntryJson = Value;

/// Helper to validate that a JSON value has the shape of a journal entry.
///
/// This performs basic structural checks (is an object, has required fields).
/// Full verification (hash recomputation, chain walking) should be done via
/// [`crate::verification`].
pub fn is_valid_entry_structure(value: &EntryJson) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    obj.contains_key("id")
        && obj.contains_key("tx_type")
        && obj.contains_key("entity_id")
        && obj.contains_key("payload")
        && obj.contains_key("timestamp")
        && obj.contains_key("actor_id")
        && obj.contains_key("hash")
}
