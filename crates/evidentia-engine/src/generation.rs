//! Idempotent document generation.
//!
//! The resolver decides "new or duplicate" from the content-addressed
//! fingerprint before any rendering happens; the generation service then
//! renders, persists, and journals new artifacts. A duplicate is a
//! success outcome carrying the existing artifact's identity, never an
//! error.

use std::sync::Arc;

use evidentia_canonical::{
    sha256_hex, ActorId, AnomalyId, Canonicalizer, Digest, DocumentId, HygieneReport, SellerId,
    TemplateVersion,
};
use evidentia_core::entry::tx;
use evidentia_core::{
    compute_signature_hash, snapshot_content_hash, DocumentStatus, GeneratedArtifact,
};
use evidentia_store::{ArtifactStore, StoreError};
use serde::Serialize;
use serde_json::{json, Value};

use crate::clock::Clock;
use crate::collaborators::{Renderer, SyncProvider};
use crate::error::EngineError;
use crate::journal::TransactionJournal;

/// One request to generate a cost-documentation artifact.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Seller scope.
    pub seller_id: SellerId,
    /// Anomaly the document substantiates.
    pub anomaly_id: AnomalyId,
    /// Template to render with.
    pub template_version: TemplateVersion,
    /// Evidence payload; must be a non-empty JSON object.
    pub evidence: Value,
    /// Actor requesting the generation.
    pub actor: ActorId,
}

/// Resolver verdict for one generation request.
#[derive(Debug)]
pub enum Resolution {
    /// The fingerprint is already taken; here is its artifact.
    Duplicate {
        /// Existing artifact holding the fingerprint.
        existing: GeneratedArtifact,
    },
    /// No artifact holds this fingerprint yet.
    New {
        /// Hash of the canonicalized evidence.
        evidence_hash: Digest,
        /// What canonicalization scrubbed from the evidence.
        hygiene: HygieneReport,
    },
}

/// Outcome of a generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    /// The artifact, freshly created or pre-existing.
    pub artifact: GeneratedArtifact,
    /// True when an identical request already produced this artifact.
    pub duplicate: bool,
}

/// Decides whether a generation request duplicates an existing artifact.
pub struct IdempotencyResolver {
    artifacts: Arc<dyn ArtifactStore>,
    canonicalizer: Canonicalizer,
}

impl IdempotencyResolver {
    /// Creates a resolver over the given artifact store.
    pub fn new(artifacts: Arc<dyn ArtifactStore>, canonicalizer: Canonicalizer) -> Self {
        Self {
            artifacts,
            canonicalizer,
        }
    }

    /// Canonicalizes the evidence and checks the fingerprint.
    ///
    /// This is a fast-path check; the store's uniqueness constraint is
    /// the authority, and a concurrent insert between resolve and insert
    /// is converted to a duplicate by the generation service.
    pub fn resolve(&self, request: &GenerationRequest) -> Result<Resolution, EngineError> {
        match &request.evidence {
            Value::Object(map) if !map.is_empty() => {}
            Value::Object(_) => {
                return Err(EngineError::Validation {
                    reason: "evidence must not be empty".to_string(),
                })
            }
            _ => {
                return Err(EngineError::Validation {
                    reason: "evidence must be a JSON object".to_string(),
                })
            }
        }

        let canonical = self.canonicalizer.canonicalize(&request.evidence)?;
        let evidence_hash = sha256_hex(&canonical.bytes);

        let latest = self.artifacts.find_latest_by_scope(
            &request.seller_id,
            &request.anomaly_id,
            &request.template_version,
        )?;
        if let Some(existing) = latest {
            if existing.evidence_hash == evidence_hash {
                return Ok(Resolution::Duplicate { existing });
            }
        }

        Ok(Resolution::New {
            evidence_hash,
            hygiene: canonical.report,
        })
    }
}

/// Renders, persists, and journals new artifacts.
pub struct GenerationService {
    artifacts: Arc<dyn ArtifactStore>,
    renderer: Arc<dyn Renderer>,
    sync: Arc<dyn SyncProvider>,
    resolver: IdempotencyResolver,
    journal: TransactionJournal,
    canonicalizer: Canonicalizer,
    clock: Arc<dyn Clock>,
}

impl GenerationService {
    /// Wires a generation service from its collaborators.
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        renderer: Arc<dyn Renderer>,
        sync: Arc<dyn SyncProvider>,
        journal: TransactionJournal,
        canonicalizer: Canonicalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let resolver = IdempotencyResolver::new(artifacts.clone(), canonicalizer.clone());
        Self {
            artifacts,
            renderer,
            sync,
            resolver,
            journal,
            canonicalizer,
            clock,
        }
    }

    /// Generates a document, or returns the existing one for an
    /// identical request.
    ///
    /// Rendering happens only after the resolver confirms the request is
    /// new. If a concurrent request wins the insert race, the loser
    /// fetches the winner's record and reports `duplicate = true`.
    pub fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome, EngineError> {
        let (evidence_hash, _hygiene) = match self.resolver.resolve(&request)? {
            Resolution::Duplicate { existing } => {
                return Ok(GenerationOutcome {
                    artifact: existing,
                    duplicate: true,
                })
            }
            Resolution::New {
                evidence_hash,
                hygiene,
            } => (evidence_hash, hygiene),
        };

        let now = self.clock.now();
        let signature_hash = compute_signature_hash(
            &self.canonicalizer,
            &evidence_hash,
            &request.template_version,
            &now,
        )?;

        // The synced-state hash starts from the current snapshot when one
        // exists; a missing or unreachable provider falls back to the
        // evidence hash and the first cross-check will flag the drift.
        let content_hash = match self.sync.latest_snapshot(&request.seller_id) {
            Ok(Some(snapshot)) => snapshot_content_hash(&self.canonicalizer, &snapshot)?,
            Ok(None) | Err(_) => evidence_hash.clone(),
        };

        let rendered = self
            .renderer
            .render(
                &request.seller_id,
                &request.anomaly_id,
                &request.template_version,
                &request.evidence,
            )
            .map_err(|err| EngineError::Render(err.to_string()))?;

        let artifact = GeneratedArtifact {
            id: DocumentId::new(format!("doc-{}", signature_hash.short())),
            seller_id: request.seller_id.clone(),
            anomaly_id: request.anomaly_id.clone(),
            template_version: request.template_version.clone(),
            evidence_hash,
            signature_hash,
            content_hash,
            status: DocumentStatus::Draft,
            generated_at: now,
            locked_at: None,
            locked_by: None,
            exported_at: None,
            exported_by: None,
            export_bundle_id: None,
            artifact_locator: Some(rendered.locator),
            artifact_size: Some(rendered.size_bytes),
        };

        match self.artifacts.insert_artifact(&artifact) {
            Ok(()) => {}
            Err(StoreError::DuplicateFingerprint { document_id }) => {
                let existing = self
                    .artifacts
                    .get_artifact(&document_id)?
                    .ok_or(EngineError::NotFound {
                        kind: "document",
                        id: document_id.to_string(),
                    })?;
                return Ok(GenerationOutcome {
                    artifact: existing,
                    duplicate: true,
                });
            }
            Err(other) => return Err(other.into()),
        }

        self.journal.record(
            tx::DOCUMENT_GENERATED,
            artifact.id.as_ref(),
            json!({
                "seller_id": artifact.seller_id,
                "anomaly_id": artifact.anomaly_id,
                "template_version": artifact.template_version,
                "evidence_hash": artifact.evidence_hash,
                "signature_hash": artifact.signature_hash,
                "content_hash": artifact.content_hash,
            }),
            &request.actor,
        )?;

        Ok(GenerationOutcome {
            artifact,
            duplicate: false,
        })
    }
}
