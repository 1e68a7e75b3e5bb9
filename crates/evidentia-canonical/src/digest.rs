use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Length of the short-hash prefix used for compact identifiers
/// (storage keys, derived document/bundle ids).
pub const SHORT_HASH_LEN: usize = 8;

/// SHA-256 digest encoded as 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Parses a validated hex digest from a string.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: s,
            });
        }
        Ok(Digest(s))
    }

    /// Constructs a digest from raw SHA-256 output bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Digest(hex::encode(bytes))
    }

    /// Returns the 8-character short-hash prefix.
    pub fn short(&self) -> &str {
        &self.0[..SHORT_HASH_LEN]
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashes arbitrary bytes with SHA-256 and returns the hex digest.
pub fn sha256_hex(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    let mut fixed = [0u8; 32];
    fixed.copy_from_slice(&out);
    Digest::from_bytes(&fixed)
}
