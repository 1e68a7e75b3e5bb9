use crate::identifiers::ProfileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hygiene status for canonicalization attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HygieneStatus {
    /// The input was canonicalizable without changes.
    Ok,
    /// Ephemeral fields were scrubbed; the canonical bytes differ from a
    /// naive serialization of the input.
    Scrubbed,
    /// The input was invalid and must be rejected.
    Invalid,
}

/// Hygiene report produced during canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygieneReport {
    /// Overall hygiene status.
    pub status: HygieneStatus,
    /// JSON paths of ephemeral keys removed before serialization.
    pub stripped_keys: Vec<String>,
    /// Metrics such as scrubbed-key counts.
    pub metrics: BTreeMap<String, u64>,
    /// Identifier of the canonicalization profile that produced the bytes.
    pub profile_id: ProfileId,
}
