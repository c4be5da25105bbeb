//! Mapping of raw clinical tagger labels onto categories.

use std::collections::HashMap;

use super::{Category, ExtractionConfig};

/// Maps raw tagger labels onto [`Category`] values.
///
/// Labels are matched case-insensitively against the category names plus any
/// configured aliases. The clinical tagger's person label never maps to a
/// category; person detection is left to the general-purpose tagger.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    vocabulary: HashMap<String, Category>,
    person_label: String,
}

impl CategoryClassifier {
    /// Create a classifier with the default vocabulary.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a classifier from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut vocabulary: HashMap<String, Category> = Category::ALL
            .iter()
            .map(|category| (category.as_str().to_string(), *category))
            .collect();

        for (label, category) in &config.label_aliases {
            vocabulary.insert(label.to_lowercase(), *category);
        }

        Self {
            vocabulary,
            person_label: config.clinical_person_label.to_lowercase(),
        }
    }

    /// Whether `label` is the clinical tagger's person label.
    pub fn is_person_label(&self, label: &str) -> bool {
        label.to_lowercase() == self.person_label
    }

    /// Classify a raw label, returning `None` when the span should contribute
    /// no value.
    pub fn classify(&self, label: &str) -> Option<Category> {
        if self.is_person_label(label) {
            return None;
        }
        self.vocabulary.get(&label.to_lowercase()).copied()
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
