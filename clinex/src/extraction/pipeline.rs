//! Tagger-to-entity-set extraction pipeline.
//!
//! The pipeline owns the two injected taggers and a reconciler. Taggers are
//! built once by the caller and shared; the pipeline itself keeps no state
//! between calls.

use std::sync::Arc;
use tracing::{debug, instrument};

use super::{EntityReconciler, EntitySet, ExtractionConfig, ExtractionRequest};
use crate::taggers::Tagger;
use crate::{ClinexError, Result};

/// Runs both taggers over a note and reconciles their output.
pub struct ExtractionPipeline {
    clinical: Arc<dyn Tagger>,
    general: Arc<dyn Tagger>,
    reconciler: EntityReconciler,
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("clinical", &self.clinical.name())
            .field("general", &self.general.name())
            .field("reconciler", &self.reconciler)
            .finish()
    }
}

impl ExtractionPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The clinical tagger.
    pub fn clinical_tagger(&self) -> &dyn Tagger {
        self.clinical.as_ref()
    }

    /// The general-purpose tagger.
    pub fn general_tagger(&self) -> &dyn Tagger {
        self.general.as_ref()
    }

    /// Extract the canonical entity set for `text`.
    ///
    /// Empty text is rejected before either tagger is called.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn extract(&self, text: &str) -> Result<EntitySet> {
        if text.is_empty() {
            return Err(ClinexError::EmptyInput);
        }

        let (clinical, general) =
            futures::try_join!(self.clinical.tag(text), self.general.tag(text))?;

        debug!(
            clinical = clinical.len(),
            general = general.len(),
            "Taggers finished"
        );

        let request = ExtractionRequest::new(text)
            .with_clinical(clinical)
            .with_general(general);

        self.reconciler.reconcile(&request)
    }
}

/// Builder for [`ExtractionPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    clinical: Option<Arc<dyn Tagger>>,
    general: Option<Arc<dyn Tagger>>,
    config: ExtractionConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clinical-domain tagger.
    pub fn clinical(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.clinical = Some(tagger);
        self
    }

    /// Set the general-purpose tagger.
    pub fn general(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.general = Some(tagger);
        self
    }

    /// Set the extraction configuration.
    pub fn config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<ExtractionPipeline> {
        let clinical = self.clinical.ok_or_else(|| {
            ClinexError::Configuration("Pipeline requires a clinical tagger".to_string())
        })?;
        let general = self.general.ok_or_else(|| {
            ClinexError::Configuration("Pipeline requires a general tagger".to_string())
        })?;

        Ok(ExtractionPipeline {
            clinical,
            general,
            reconciler: EntityReconciler::from_config(&self.config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{Category, Span};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed spans and counts how often it was called.
    struct FixedTagger {
        name: &'static str,
        spans: Vec<Span>,
        calls: AtomicUsize,
    }

    impl FixedTagger {
        fn new(name: &'static str, spans: Vec<Span>) -> Arc<Self> {
            Arc::new(Self {
                name,
                spans,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Tagger for FixedTagger {
        async fn tag(&self, _text: &str) -> Result<Vec<Span>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.spans.clone())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct FailingTagger;

    #[async_trait]
    impl Tagger for FailingTagger {
        async fn tag(&self, _text: &str) -> Result<Vec<Span>> {
            Err(ClinexError::Tagger("service down".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_taggers() {
        let clinical = FixedTagger::new("clinical", vec![]);
        let general = FixedTagger::new("general", vec![]);
        let pipeline = ExtractionPipeline::builder()
            .clinical(clinical.clone())
            .general(general.clone())
            .build()
            .unwrap();

        let result = pipeline.extract("").await;
        assert!(matches!(result, Err(ClinexError::EmptyInput)));
        assert_eq!(clinical.calls.load(Ordering::SeqCst), 0);
        assert_eq!(general.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_reconciles_both_taggers() {
        let text = "Dr. Smith prescribed Smithadol 10mg";
        let pipeline = ExtractionPipeline::builder()
            .clinical(FixedTagger::new(
                "clinical",
                vec![
                    Span::new("DRUG", "Smithadol", 21, 30),
                    Span::new("STRENGTH", "10mg", 31, 35),
                ],
            ))
            .general(FixedTagger::new(
                "general",
                vec![Span::new("PERSON", "Smith", 4, 9)],
            ))
            .build()
            .unwrap();

        let entities = pipeline.extract(text).await.unwrap();
        assert!(entities.contains(Category::Person, "Smith"));
        assert!(entities.contains(Category::Drug, "Smithadol"));
        assert!(entities.contains(Category::Strength, "10mg"));
    }

    #[tokio::test]
    async fn test_tagger_failure_propagates() {
        let pipeline = ExtractionPipeline::builder()
            .clinical(Arc::new(FailingTagger))
            .general(FixedTagger::new("general", vec![]))
            .build()
            .unwrap();

        let result = pipeline.extract("Aspirin").await;
        assert!(matches!(result, Err(ClinexError::Tagger(_))));
    }

    #[test]
    fn test_builder_requires_both_taggers() {
        let result = ExtractionPipeline::builder()
            .clinical(FixedTagger::new("clinical", vec![]))
            .build();
        assert!(matches!(result, Err(ClinexError::Configuration(_))));
    }
}
