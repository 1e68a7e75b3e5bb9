use canonical_json::to_string;
use serde_json::Value;

use crate::digest::{sha256_hex, Digest};
use crate::hygiene::{HygieneReport, HygieneStatus};
use crate::identifiers::ProfileId;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel prefix marking ephemeral object keys. Keys starting with this
/// prefix are scrubbed at every nesting level before serialization and never
/// participate in hashing.
pub const EPHEMERAL_PREFIX: char = '_';

/// Name of the default canonicalization profile.
pub const DEFAULT_PROFILE: &str = "evidentia-canonical-v1";

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided JSON could not be canonicalized.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// Canonical UTF-8 bytes for the scrubbed input value.
    pub bytes: Vec<u8>,
    /// Hygiene report describing what was scrubbed.
    pub report: HygieneReport,
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
///
/// Object keys are sorted lexicographically at every nesting level (RFC 8785
/// member ordering), ephemeral keys are scrubbed first, and array order is
/// preserved because it is semantically meaningful. No I/O, no side effects.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    profile: ProfileId,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(ProfileId::new(DEFAULT_PROFILE.to_string()))
    }
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided profile.
    pub fn new(profile: ProfileId) -> Self {
        Self { profile }
    }

    /// Produces canonical bytes + hygiene report.
    pub fn canonicalize(
        &self,
        value: &Value,
    ) -> Result<CanonicalizationResult, CanonicalizationError> {
        let mut report = HygieneReport {
            status: HygieneStatus::Ok,
            stripped_keys: vec![],
            metrics: BTreeMap::new(),
            profile_id: self.profile.clone(),
        };

        let scrubbed = self.scrub(value, Path::root(), &mut report)?;

        if !report.stripped_keys.is_empty() {
            report.status = HygieneStatus::Scrubbed;
            report
                .metrics
                .insert("scrubbed_keys".to_string(), report.stripped_keys.len() as u64);
        }

        let canonical =
            to_string(&scrubbed).map_err(|err| CanonicalizationError::Other(err.to_string()))?;

        Ok(CanonicalizationResult {
            bytes: canonical.into_bytes(),
            report,
        })
    }

    /// Canonicalizes and hashes a value in one step.
    pub fn hash(&self, value: &Value) -> Result<Digest, CanonicalizationError> {
        let result = self.canonicalize(value)?;
        Ok(sha256_hex(&result.bytes))
    }

    /// Recursively removes ephemeral keys and validates structure.
    fn scrub(
        &self,
        value: &Value,
        path: Path,
        report: &mut HygieneReport,
    ) -> Result<Value, CanonicalizationError> {
        match value {
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, child) in map {
                    if key.starts_with(EPHEMERAL_PREFIX) {
                        report.stripped_keys.push(path.push_field(key).to_string());
                        continue;
                    }
                    let scrubbed = self.scrub(child, path.push_field(key), report)?;
                    out.insert(key.clone(), scrubbed);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    out.push(self.scrub(item, path.push_index(idx), report)?);
                }
                Ok(Value::Array(out))
            }
            Value::Number(num) => {
                if num.is_f64() {
                    let f = num.as_f64().unwrap_or(f64::NAN);
                    if !f.is_finite() {
                        report.status = HygieneStatus::Invalid;
                        return Err(CanonicalizationError::NonFiniteNumber(format!("{}", path)));
                    }
                }
                Ok(value.clone())
            }
            Value::String(_) | Value::Bool(_) | Value::Null => Ok(value.clone()),
        }
    }
}
