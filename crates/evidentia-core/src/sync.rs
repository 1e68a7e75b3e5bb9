use evidentia_canonical::{
    AnomalyId, CanonicalizationError, Canonicalizer, Digest, SellerId, Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Severity of a synced anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth reviewing.
    Medium,
    /// Likely refund impact.
    High,
    /// Confirmed refund impact.
    Critical,
}

impl Severity {
    /// True for the severities the cross-check engine warns about.
    pub fn is_high(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

/// One anomaly in an external sync snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncAnomaly {
    /// Anomaly identifier.
    pub anomaly_id: AnomalyId,
    /// Severity as reported by the detector.
    pub severity: Severity,
    /// When the anomaly was first detected.
    pub detected_at: Timestamp,
    /// Source facts backing the anomaly.
    pub facts: Value,
}

/// Seller-scoped snapshot of the latest externally synced anomalies.
///
/// Read-only input from the sync collaborator; this crate only hashes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    /// Seller the snapshot belongs to.
    pub seller_id: SellerId,
    /// When the snapshot was synced.
    pub synced_at: Timestamp,
    /// Latest known anomalies.
    pub anomalies: Vec<SyncAnomaly>,
}

impl SyncSnapshot {
    /// True if the snapshot carries no anomalies.
    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Computes the canonical content hash of a snapshot.
///
/// Anomalies are sorted by anomaly id before hashing so that provider
/// ordering never affects the digest; ephemeral `_`-prefixed keys inside
/// `facts` are scrubbed by the canonicalizer.
pub fn snapshot_content_hash(
    canonicalizer: &Canonicalizer,
    snapshot: &SyncSnapshot,
) -> Result<Digest, CanonicalizationError> {
    let mut anomalies: Vec<&SyncAnomaly> = snapshot.anomalies.iter().collect();
    anomalies.sort_by(|a, b| a.anomaly_id.cmp(&b.anomaly_id));

    let projected: Vec<Value> = anomalies
        .into_iter()
        .map(|a| {
            json!({
                "anomaly_id": a.anomaly_id,
                "severity": a.severity,
                "detected_at": a.detected_at,
                "facts": a.facts,
            })
        })
        .collect();

    canonicalizer.hash(&json!({ "anomalies": projected }))
}
