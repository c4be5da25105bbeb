//! Data Transfer Objects for the API

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use clinex::core::{HealthReport, TaggerStatus};
use clinex::extraction::EntitySet;
use clinex::storage::ClinicalNote;

/// Entities grouped by category; every category is present
pub type EntitiesDto = BTreeMap<String, Vec<String>>;

fn entities_dto(entities: &EntitySet) -> EntitiesDto {
    entities
        .iter()
        .map(|(category, values)| (category.to_string(), values.iter().cloned().collect()))
        .collect()
}

/// Request to extract entities from a note
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Free-text clinical note
    #[serde(default)]
    #[schema(example = "A 45-year-old man was given Aspirin 81mg once daily.")]
    pub text: String,
}

/// Result of extracting and storing a note
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractResponse {
    /// Identifier of the stored note
    pub note_id: String,

    /// The submitted text
    pub text: String,

    /// Extracted entities by category
    #[schema(value_type = Object)]
    pub entities: EntitiesDto,

    /// When the note was stored
    pub created_at: DateTime<Utc>,
}

impl From<ClinicalNote> for ExtractResponse {
    fn from(note: ClinicalNote) -> Self {
        Self {
            entities: entities_dto(&note.entities),
            note_id: note.id,
            text: note.text,
            created_at: note.created_at,
        }
    }
}

/// A stored note
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteDto {
    /// Unique identifier for the note
    pub id: String,

    /// Note text
    pub text: String,

    /// Extracted entities by category
    #[schema(value_type = Object)]
    pub entities: EntitiesDto,

    /// When the note was stored
    pub created_at: DateTime<Utc>,
}

impl From<ClinicalNote> for NoteDto {
    fn from(note: ClinicalNote) -> Self {
        Self {
            entities: entities_dto(&note.entities),
            id: note.id,
            text: note.text,
            created_at: note.created_at,
        }
    }
}

/// Parameters for listing notes
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListNotesParams {
    /// Maximum number of notes to return
    pub limit: Option<usize>,
}

/// Load state of one tagger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaggerStatusDto {
    pub role: String,
    pub provider: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<TaggerStatus> for TaggerStatusDto {
    fn from(status: TaggerStatus) -> Self {
        Self {
            role: status.role,
            provider: status.provider,
            loaded: status.loaded,
            error: status.error,
        }
    }
}

/// Service health
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    /// "OK" when storage and both taggers are usable, otherwise "DEGRADED"
    pub status: String,

    /// Server version
    pub version: String,

    /// Whether the note store answered
    pub storage: bool,

    /// Number of stored notes
    pub note_count: Option<usize>,

    /// Tagger load state
    pub taggers: Vec<TaggerStatusDto>,
}

impl From<HealthReport> for HealthDto {
    fn from(report: HealthReport) -> Self {
        Self {
            status: if report.is_healthy() { "OK" } else { "DEGRADED" }.to_string(),
            version: clinex::VERSION.to_string(),
            storage: report.storage,
            note_count: report.note_count,
            taggers: report.taggers.into_iter().map(Into::into).collect(),
        }
    }
}
