//! Note Manager interface for Clinex
//!
//! The primary entry point: takes note text, runs extraction and persists the
//! result. HTTP and CLI front ends are thin layers over this type.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::ClinexConfig;
use crate::extraction::{EntitySet, ExtractionPipeline};
use crate::storage::{ClinicalNote, NoteStore, create_note_store};
use crate::taggers::{Tagger, TaggerConfig, load_tagger};
use crate::{ClinexError, Result};

/// Load state of one configured tagger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggerStatus {
    /// Role of the tagger ("clinical" or "general")
    pub role: String,

    /// Provider behind the role, e.g. "rules" or "remote"
    pub provider: String,

    /// Whether the tagger loaded successfully
    pub loaded: bool,

    /// Load failure, if any
    pub error: Option<String>,
}

/// Snapshot of the manager's dependencies.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Whether the note store answered
    pub storage: bool,

    /// Number of stored notes, if the store answered
    pub note_count: Option<usize>,

    /// Tagger load state
    pub taggers: Vec<TaggerStatus>,
}

impl HealthReport {
    /// Whether every dependency is usable.
    pub fn is_healthy(&self) -> bool {
        self.storage && self.taggers.iter().all(|tagger| tagger.loaded)
    }
}

/// The primary interface for extracting and storing clinical notes.
#[derive(Debug)]
pub struct NoteManager {
    /// None when a tagger failed to load
    pipeline: Option<ExtractionPipeline>,

    /// Load state of both taggers
    taggers: Vec<TaggerStatus>,

    /// Note persistence
    store: Arc<dyn NoteStore>,

    /// Configuration for the manager
    config: ClinexConfig,
}

impl NoteManager {
    /// Create a manager from an already-built pipeline and store.
    pub fn new(pipeline: ExtractionPipeline, store: Arc<dyn NoteStore>, config: ClinexConfig) -> Self {
        let taggers = vec![
            TaggerStatus {
                role: "clinical".to_string(),
                provider: pipeline.clinical_tagger().provider().to_string(),
                loaded: true,
                error: None,
            },
            TaggerStatus {
                role: "general".to_string(),
                provider: pipeline.general_tagger().provider().to_string(),
                loaded: true,
                error: None,
            },
        ];

        Self {
            pipeline: Some(pipeline),
            taggers,
            store,
            config,
        }
    }

    /// Load both taggers and open the store described by `config`.
    ///
    /// A tagger that fails to load does not fail construction. The failure
    /// is recorded and every extraction reports it as unavailable.
    pub async fn from_config(config: ClinexConfig) -> Result<Self> {
        let store = create_note_store(&config.storage).await?;

        let clinical = load_role("clinical", &config.taggers.clinical).await;
        let general = load_role("general", &config.taggers.general).await;

        let taggers = vec![clinical.1.clone(), general.1.clone()];
        let pipeline = match (clinical.0, general.0) {
            (Some(clinical), Some(general)) => Some(
                ExtractionPipeline::builder()
                    .clinical(clinical)
                    .general(general)
                    .config(config.extraction.clone())
                    .build()?,
            ),
            _ => None,
        };

        Ok(Self {
            pipeline,
            taggers,
            store,
            config,
        })
    }

    /// Extract entities from `text` without storing anything.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn extract(&self, text: &str) -> Result<EntitySet> {
        if text.is_empty() {
            return Err(ClinexError::EmptyInput);
        }

        self.pipeline()?.extract(text).await
    }

    /// Extract entities from `text` and persist the note.
    ///
    /// Nothing is stored when the text is empty, a tagger is unavailable,
    /// or extraction fails.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn submit_note(&self, text: &str) -> Result<ClinicalNote> {
        let entities = self.extract(text).await?;
        let note = self
            .store
            .create_note(ClinicalNote::new(text, entities))
            .await?;

        info!(note_id = %note.id, entities = note.entities.total(), "Stored note");
        Ok(note)
    }

    /// List stored notes, newest first.
    pub async fn list_notes(&self, limit: Option<usize>) -> Result<Vec<ClinicalNote>> {
        Ok(self.store.list_notes(limit).await?)
    }

    /// Get a stored note by id.
    pub async fn get_note(&self, id: &str) -> Result<Option<ClinicalNote>> {
        Ok(self.store.get_note(id).await?)
    }

    /// Number of stored notes.
    pub async fn count_notes(&self) -> Result<usize> {
        Ok(self.store.count_notes().await?)
    }

    /// Check storage and report tagger load state.
    pub async fn health(&self) -> HealthReport {
        let storage = match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("Storage health check failed: {}", e);
                false
            }
        };
        let note_count = if storage {
            self.store.count_notes().await.ok()
        } else {
            None
        };

        HealthReport {
            storage,
            note_count,
            taggers: self.taggers.clone(),
        }
    }

    /// Load state of both taggers.
    pub fn tagger_status(&self) -> &[TaggerStatus] {
        &self.taggers
    }

    /// Configuration the manager was built with.
    pub fn config(&self) -> &ClinexConfig {
        &self.config
    }

    fn pipeline(&self) -> Result<&ExtractionPipeline> {
        self.pipeline.as_ref().ok_or_else(|| {
            let failed = self.taggers.iter().find(|tagger| !tagger.loaded);
            ClinexError::TaggerUnavailable {
                name: failed.map(|t| t.role.clone()).unwrap_or_default(),
                reason: failed
                    .and_then(|t| t.error.clone())
                    .unwrap_or_else(|| "tagger not loaded".to_string()),
            }
        })
    }
}

async fn load_role(role: &str, config: &TaggerConfig) -> (Option<Arc<dyn Tagger>>, TaggerStatus) {
    match load_tagger(role, config).await {
        Ok(tagger) => {
            let status = TaggerStatus {
                role: role.to_string(),
                provider: tagger.provider().to_string(),
                loaded: true,
                error: None,
            };
            (Some(tagger), status)
        }
        Err(e) => {
            warn!(role, kind = config.kind(), "Tagger failed to load: {}", e);
            (
                None,
                TaggerStatus {
                    role: role.to_string(),
                    provider: config.kind().to_string(),
                    loaded: false,
                    error: Some(e.to_string()),
                },
            )
        }
    }
}
