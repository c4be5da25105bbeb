//! Configuration for the extraction passes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Category;

/// Configuration for label classification, person suppression and age detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Label the clinical tagger uses for people. Spans with this label
    /// (case-insensitive) are skipped entirely.
    pub clinical_person_label: String,

    /// Labels the general-purpose tagger uses for people (exact match)
    pub general_person_labels: Vec<String>,

    /// Extra clinical labels mapped onto categories, keyed case-insensitively
    pub label_aliases: BTreeMap<String, Category>,

    /// What the age pass records for each match
    pub age_capture: AgeCapture,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            clinical_person_label: "person".to_string(),
            general_person_labels: vec!["PERSON".to_string()],
            label_aliases: BTreeMap::new(),
            age_capture: AgeCapture::Number,
        }
    }
}

/// What the age pass records for each regex match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCapture {
    /// Only the digits, e.g. "45"
    #[default]
    Number,
    /// The whole matched phrase, e.g. "45-year-old"
    Phrase,
}
