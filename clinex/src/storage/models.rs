//! Stored note records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::EntitySet;

/// A persisted clinical note with its extracted entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalNote {
    /// Unique note identifier
    pub id: String,

    /// Original note text
    pub text: String,

    /// Reconciled entities, one multi-valued field per category
    pub entities: EntitySet,

    /// When the note was stored
    pub created_at: DateTime<Utc>,
}

impl ClinicalNote {
    /// Create a new note with a fresh identifier.
    pub fn new(text: impl Into<String>, entities: EntitySet) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            entities,
            created_at: Utc::now(),
        }
    }
}
