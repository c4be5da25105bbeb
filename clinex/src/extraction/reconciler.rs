//! Reconciliation of clinical, general-purpose and regex extractions.
//!
//! The passes run in a fixed order:
//!
//! 1. **Clinical pass**: each clinical span whose label maps to a category adds
//!    its text there. Every clinical span except the person label is recorded as
//!    a claimed range, including spans whose label maps to nothing.
//! 2. **General pass**: general-purpose person spans are added to `person`
//!    unless they overlap a claimed clinical range.
//! 3. **Age pass**: regex ages are added to `age`. They neither claim ranges nor
//!    get suppressed.
//! 4. **Deduplication**: each category keeps one copy of every exact value.

use tracing::{debug, trace};

use super::{
    AgeDetector, Category, CategoryClassifier, EntitySet, ExtractionConfig, Span,
    overlap::overlaps_any,
};
use crate::{ClinexError, Result};

/// Input to a single reconciliation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    /// Raw note text
    pub text: String,
    /// Spans from the clinical tagger, in tagger order
    pub clinical: Vec<Span>,
    /// Spans from the general-purpose tagger, in tagger order
    pub general: Vec<Span>,
    /// Pre-computed age matches. When `None`, the reconciler runs its own detector.
    pub ages: Option<Vec<String>>,
}

impl ExtractionRequest {
    /// Create a request for `text` with no spans.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the clinical tagger output.
    pub fn with_clinical(mut self, spans: Vec<Span>) -> Self {
        self.clinical = spans;
        self
    }

    /// Set the general-purpose tagger output.
    pub fn with_general(mut self, spans: Vec<Span>) -> Self {
        self.general = spans;
        self
    }

    /// Supply age matches computed elsewhere.
    pub fn with_ages(mut self, ages: Vec<String>) -> Self {
        self.ages = Some(ages);
        self
    }
}

/// Combines tagger outputs into one [`EntitySet`].
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls without locking.
#[derive(Debug, Clone)]
pub struct EntityReconciler {
    classifier: CategoryClassifier,
    general_person_labels: Vec<String>,
    age_detector: AgeDetector,
}

impl EntityReconciler {
    /// Create a reconciler with default configuration.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a reconciler from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            classifier: CategoryClassifier::from_config(config),
            general_person_labels: config.general_person_labels.clone(),
            age_detector: AgeDetector::with_capture(config.age_capture),
        }
    }

    /// The age detector used when a request carries no age list.
    pub fn age_detector(&self) -> &AgeDetector {
        &self.age_detector
    }

    /// Reconcile a request into a canonical entity set.
    ///
    /// Fails with [`ClinexError::EmptyInput`] when the text is empty.
    pub fn reconcile(&self, request: &ExtractionRequest) -> Result<EntitySet> {
        if request.text.is_empty() {
            return Err(ClinexError::EmptyInput);
        }

        let mut entities = EntitySet::new();

        let claimed = self.clinical_pass(&request.clinical, &mut entities);
        self.general_pass(&request.general, &claimed, &mut entities);

        let detected;
        let ages = match &request.ages {
            Some(ages) => ages,
            None => {
                detected = self.age_detector.detect(&request.text);
                &detected
            }
        };
        for age in ages {
            entities.insert(Category::Age, age.as_str());
        }

        debug!(
            clinical_spans = request.clinical.len(),
            general_spans = request.general.len(),
            ages = ages.len(),
            claimed_ranges = claimed.len(),
            total_values = entities.total(),
            "Reconciled note entities"
        );

        Ok(entities)
    }

    /// Record clinical values and return the ranges they claim.
    fn clinical_pass(&self, spans: &[Span], entities: &mut EntitySet) -> Vec<(usize, usize)> {
        let mut claimed = Vec::with_capacity(spans.len());

        for span in spans {
            if self.classifier.is_person_label(&span.label) {
                trace!(text = %span.text, "Skipping clinical person span");
                continue;
            }
            if let Some(category) = self.classifier.classify(&span.label) {
                entities.insert(category, span.text.as_str());
            }
            claimed.push(span.range());
        }

        claimed
    }

    /// Add general-purpose person spans that no clinical span claims.
    fn general_pass(&self, spans: &[Span], claimed: &[(usize, usize)], entities: &mut EntitySet) {
        for span in spans
            .iter()
            .filter(|span| self.general_person_labels.contains(&span.label))
        {
            if overlaps_any(span.range(), claimed) {
                trace!(text = %span.text, "Suppressing person span overlapping a clinical span");
                continue;
            }
            entities.insert(Category::Person, span.text.as_str());
        }
    }
}

impl Default for EntityReconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconcile with the default configuration.
pub fn reconcile(request: &ExtractionRequest) -> Result<EntitySet> {
    EntityReconciler::new().reconcile(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_rejected() {
        let result = reconcile(&ExtractionRequest::new(""));
        assert!(matches!(result, Err(ClinexError::EmptyInput)));
    }

    #[test]
    fn test_clinical_person_span_is_skipped_and_claims_nothing() {
        let text = "John Smith takes Aspirin";
        let request = ExtractionRequest::new(text)
            .with_clinical(vec![
                Span::new("PERSON", "John Smith", 0, 10),
                Span::new("DRUG", "Aspirin", 17, 24),
            ])
            .with_general(vec![Span::new("PERSON", "John Smith", 0, 10)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.contains(Category::Person, "John Smith"));
        assert!(entities.contains(Category::Drug, "Aspirin"));
    }

    #[test]
    fn test_supplied_ages_replace_detection() {
        let request =
            ExtractionRequest::new("A 45-year-old man").with_ages(vec!["forty-five".to_string()]);

        let entities = reconcile(&request).unwrap();
        assert_eq!(entities.get(Category::Age).len(), 1);
        assert!(entities.contains(Category::Age, "forty-five"));
    }

    #[test]
    fn test_non_person_general_labels_are_ignored() {
        let request = ExtractionRequest::new("Seen at Mercy Hospital")
            .with_general(vec![Span::new("ORG", "Mercy Hospital", 8, 22)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_general_person_label_match_is_exact() {
        let request = ExtractionRequest::new("Mr. Jones")
            .with_general(vec![Span::new("person", "Jones", 4, 9)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.get(Category::Person).is_empty());
    }
}
