//! Content-addressed fingerprint computation.
//!
//! Signature hashes are domain-separated:
//! `sha256(domain_separator || canonical_bytes(binding))`, so a signature
//! hash can never collide with a plain evidence or entry hash.

use evidentia_canonical::{
    AnomalyId, CanonicalizationError, Canonicalizer, Digest, SellerId, TemplateVersion, Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest as Sha2Digest, Sha256};

/// Domain separator for signature hash computation.
const SIGNATURE_DOMAIN_SEPARATOR: &[u8] = b"evidentia:signature:v1\0";

/// The tuple that uniquely identifies one logical artifact.
///
/// No two Draft/Locked/Exported records may share this tuple with differing
/// ids; the artifact store enforces it as a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Seller scope.
    pub seller_id: SellerId,
    /// Anomaly scope.
    pub anomaly_id: AnomalyId,
    /// Template version scope.
    pub template_version: TemplateVersion,
    /// Hash of the canonicalized evidence payload.
    pub evidence_hash: Digest,
}

impl Fingerprint {
    /// Returns the 8-char short hash used in derived identifiers.
    pub fn short(&self) -> &str {
        self.evidence_hash.short()
    }
}

/// Computes the signature hash binding evidence to its template and
/// generation time.
pub fn compute_signature_hash(
    canonicalizer: &Canonicalizer,
    evidence_hash: &Digest,
    template_version: &TemplateVersion,
    generated_at: &Timestamp,
) -> Result<Digest, CanonicalizationError> {
    let binding = json!({
        "evidence_hash": evidence_hash,
        "template_version": template_version,
        "generated_at": generated_at,
    });
    let canonical = canonicalizer.canonicalize(&binding)?;

    let mut hasher = Sha256::new();
    hasher.update(SIGNATURE_DOMAIN_SEPARATOR);
    hasher.update(&canonical.bytes);
    let out = hasher.finalize();
    let mut fixed = [0u8; 32];
    fixed.copy_from_slice(&out);
    Ok(Digest::from_bytes(&fixed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_canonical::sha256_hex;

    fn inputs() -> (Canonicalizer, Digest, TemplateVersion, Timestamp) {
        (
            Canonicalizer::default(),
            sha256_hex(b"evidence"),
            TemplateVersion::parse("v1.0").unwrap(),
            Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap(),
        )
    }

    #[test]
    fn signature_hash_is_deterministic() {
        let (c, ev, tv, ts) = inputs();
        let a = compute_signature_hash(&c, &ev, &tv, &ts).unwrap();
        let b = compute_signature_hash(&c, &ev, &tv, &ts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_hash_binds_all_inputs() {
        let (c, ev, tv, ts) = inputs();
        let base = compute_signature_hash(&c, &ev, &tv, &ts).unwrap();

        let other_ev = sha256_hex(b"other-evidence");
        assert_ne!(base, compute_signature_hash(&c, &other_ev, &tv, &ts).unwrap());

        let other_tv = TemplateVersion::parse("v2.0").unwrap();
        assert_ne!(base, compute_signature_hash(&c, &ev, &other_tv, &ts).unwrap());

        let other_ts = Timestamp::parse("2024-01-02T00:00:00.000Z").unwrap();
        assert_ne!(base, compute_signature_hash(&c, &ev, &tv, &other_ts).unwrap());
    }

    #[test]
    fn signature_hash_differs_from_plain_hash_of_binding() {
        // Domain separation: the same binding hashed without the separator
        // must not collide.
        let (c, ev, tv, ts) = inputs();
        let sig = compute_signature_hash(&c, &ev, &tv, &ts).unwrap();
        let plain = c
            .hash(&json!({
                "evidence_hash": ev,
                "template_version": tv,
                "generated_at": ts,
            }))
            .unwrap();
        assert_ne!(sig, plain);
    }
}
