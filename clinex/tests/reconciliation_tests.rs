//! Reconciliation behaviour over fixed tagger output.
//!
//! Tagger output is supplied directly as spans, so these tests exercise the
//! reconciler and pipeline without any model or service behind them.

use async_trait::async_trait;
use clinex::extraction::*;
use clinex::taggers::Tagger;
use clinex::{ClinexError, Result};
use std::sync::Arc;

const SCENARIO: &str = "A 45-year-old man was given Aspirin 81mg once daily.";
const PRESCRIBER: &str = "Dr. Smith prescribed Smithadol 10mg";

fn scenario_clinical() -> Vec<Span> {
    vec![
        Span::new("DRUG", "Aspirin", 28, 35),
        Span::new("STRENGTH", "81mg", 36, 40),
        Span::new("FREQUENCY", "once daily", 41, 51),
    ]
}

fn phrase_reconciler() -> EntityReconciler {
    EntityReconciler::from_config(&ExtractionConfig {
        age_capture: AgeCapture::Phrase,
        ..ExtractionConfig::default()
    })
}

/// Tagger returning a fixed span list.
struct FixedTagger(&'static str, Vec<Span>);

#[async_trait]
impl Tagger for FixedTagger {
    async fn tag(&self, _text: &str) -> Result<Vec<Span>> {
        Ok(self.1.clone())
    }

    fn name(&self) -> &str {
        self.0
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_reconcile_is_deterministic() {
        let reconciler = EntityReconciler::new();
        let request = ExtractionRequest::new(PRESCRIBER)
            .with_clinical(vec![Span::new("DRUG", "Smithadol", 21, 30)])
            .with_general(vec![Span::new("PERSON", "Smith", 4, 9)]);

        let first = reconciler.reconcile(&request).unwrap();
        for _ in 0..10 {
            assert_eq!(reconciler.reconcile(&request).unwrap(), first);
        }
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let text = "Aspirin 81mg, then Aspirin 81mg again";
        let request = ExtractionRequest::new(text).with_clinical(vec![
            Span::new("DRUG", "Aspirin", 0, 7),
            Span::new("STRENGTH", "81mg", 8, 12),
            Span::new("DRUG", "Aspirin", 19, 26),
            Span::new("STRENGTH", "81mg", 27, 31),
        ]);

        let once = reconcile(&request).unwrap();
        let twice = reconcile(&request).unwrap();

        assert_eq!(once.get(Category::Drug).len(), 1);
        assert_eq!(once.get(Category::Strength).len(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_overlapping_person_is_suppressed() {
        let text = "Smithadol 10mg daily";
        let request = ExtractionRequest::new(text)
            .with_clinical(vec![Span::new("DRUG", "Smithadol", 0, 9)])
            .with_general(vec![Span::new("PERSON", "Smith", 0, 5)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.get(Category::Person).is_empty());
        assert!(entities.contains(Category::Drug, "Smithadol"));
    }

    #[test]
    fn test_non_overlapping_person_is_kept() {
        let request = ExtractionRequest::new(PRESCRIBER)
            .with_clinical(vec![
                Span::new("DRUG", "Smithadol", 21, 30),
                Span::new("STRENGTH", "10mg", 31, 35),
            ])
            .with_general(vec![Span::new("PERSON", "Smith", 4, 9)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.contains(Category::Person, "Smith"));
        assert!(entities.contains(Category::Drug, "Smithadol"));
        assert!(entities.contains(Category::Strength, "10mg"));
    }

    #[test]
    fn test_separate_ranges_do_not_overlap() {
        assert!(!spans_overlap(4, 9, 22, 31));
        assert!(!spans_overlap(4, 9, 21, 30));
        assert!(spans_overlap(4, 9, 8, 12));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let result = reconcile(&ExtractionRequest::new(""));
        assert!(matches!(result, Err(ClinexError::EmptyInput)));
    }

    #[test]
    fn test_ages_are_added_regardless_of_taggers() {
        let request = ExtractionRequest::new(SCENARIO).with_clinical(scenario_clinical());

        let entities = phrase_reconciler().reconcile(&request).unwrap();

        assert_eq!(entities.get(Category::Age).len(), 1);
        assert!(entities.contains(Category::Age, "45-year-old"));
        assert!(entities.contains(Category::Drug, "Aspirin"));
        assert!(entities.contains(Category::Strength, "81mg"));
        assert!(entities.contains(Category::Frequency, "once daily"));
        assert_eq!(entities.total(), 4);
    }

    #[test]
    fn test_ages_survive_overlapping_clinical_span() {
        // A clinical span covering the age phrase does not suppress the age.
        let request = ExtractionRequest::new(SCENARIO)
            .with_clinical(vec![Span::new("CONDITION", "45-year-old man", 2, 17)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.contains(Category::Age, "45"));
        assert!(entities.contains(Category::Condition, "45-year-old man"));
    }

    #[test]
    fn test_unmapped_label_still_suppresses() {
        let request = ExtractionRequest::new(PRESCRIBER)
            .with_clinical(vec![Span::new("MISC", "Smith", 4, 9)])
            .with_general(vec![Span::new("PERSON", "Smith", 4, 9)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_clinical_person_spans_are_discarded() {
        let request = ExtractionRequest::new(PRESCRIBER)
            .with_clinical(vec![Span::new("PERSON", "Smith", 4, 9)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.get(Category::Person).is_empty());
    }

    #[test]
    fn test_clinical_person_span_does_not_suppress() {
        let request = ExtractionRequest::new(PRESCRIBER)
            .with_clinical(vec![Span::new("person", "Smith", 4, 9)])
            .with_general(vec![Span::new("PERSON", "Smith", 4, 9)]);

        let entities = reconcile(&request).unwrap();
        assert!(entities.contains(Category::Person, "Smith"));
    }
}

mod pipeline {
    use super::*;

    #[tokio::test]
    async fn test_scenario_with_fake_taggers() {
        let pipeline = ExtractionPipeline::builder()
            .clinical(Arc::new(FixedTagger("clinical", scenario_clinical())))
            .general(Arc::new(FixedTagger("general", vec![])))
            .config(ExtractionConfig {
                age_capture: AgeCapture::Phrase,
                ..ExtractionConfig::default()
            })
            .build()
            .unwrap();

        let entities = pipeline.extract(SCENARIO).await.unwrap();

        assert!(entities.contains(Category::Age, "45-year-old"));
        assert!(entities.contains(Category::Drug, "Aspirin"));
        assert!(entities.contains(Category::Strength, "81mg"));
        assert!(entities.contains(Category::Frequency, "once daily"));
        for category in [
            Category::Person,
            Category::Route,
            Category::Duration,
            Category::Form,
            Category::Dosage,
            Category::Diagnosis,
            Category::Condition,
        ] {
            assert!(entities.get(category).is_empty(), "{} should be empty", category);
        }
    }

    #[tokio::test]
    async fn test_scenario_with_rule_taggers() {
        let clinical =
            clinex::taggers::load_tagger("clinical", &clinex::taggers::TaggersConfig::default().clinical)
                .await
                .unwrap();
        let general =
            clinex::taggers::load_tagger("general", &clinex::taggers::TaggersConfig::default().general)
                .await
                .unwrap();

        let pipeline = ExtractionPipeline::builder()
            .clinical(clinical)
            .general(general)
            .build()
            .unwrap();

        let entities = pipeline.extract(SCENARIO).await.unwrap();
        assert!(entities.contains(Category::Age, "45"));
        assert!(entities.contains(Category::Drug, "Aspirin"));
        assert!(entities.contains(Category::Strength, "81mg"));
        assert!(entities.contains(Category::Frequency, "once daily"));
        assert!(entities.get(Category::Person).is_empty());

        let entities = pipeline.extract(PRESCRIBER).await.unwrap();
        assert!(entities.contains(Category::Person, "Smith"));
        assert!(entities.contains(Category::Strength, "10mg"));
    }

    #[tokio::test]
    async fn test_custom_general_person_label() {
        let pipeline = ExtractionPipeline::builder()
            .clinical(Arc::new(FixedTagger("clinical", vec![])))
            .general(Arc::new(FixedTagger(
                "general",
                vec![
                    Span::new("PER", "Smith", 4, 9),
                    Span::new("PERSON", "Dr", 0, 2),
                ],
            )))
            .config(ExtractionConfig {
                general_person_labels: vec!["PER".to_string()],
                ..ExtractionConfig::default()
            })
            .build()
            .unwrap();

        let entities = pipeline.extract(PRESCRIBER).await.unwrap();
        assert!(entities.contains(Category::Person, "Smith"));
        assert!(!entities.contains(Category::Person, "Dr"));
    }
}
