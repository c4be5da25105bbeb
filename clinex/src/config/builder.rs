//! Configuration builder.

use super::{Result, models::*, validation};
use crate::extraction::AgeCapture;
use crate::storage::StorageConfig;
use crate::taggers::{RemoteTaggerConfig, RuleTaggerConfig, TaggerConfig};
use std::path::{Path, PathBuf};

/// Builder for creating ClinexConfig instances.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: ClinexConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration: rule taggers and in-memory storage.
    pub fn defaults() -> Self {
        Self::new()
    }

    /// Configuration for tests: in-memory storage and warn-level logs.
    pub fn testing() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Warn)
    }

    /// Configuration for local development: debug logs.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Use in-memory note storage.
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage = StorageConfig::memory();
        self
    }

    /// Use RocksDB note storage at `path`.
    pub fn with_rocksdb_storage<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage = StorageConfig::rocksdb(path.as_ref().to_path_buf());
        self
    }

    /// Set the clinical tagger provider.
    pub fn with_clinical_tagger(mut self, tagger: TaggerConfig) -> Self {
        self.config.taggers.clinical = tagger;
        self
    }

    /// Set the general tagger provider.
    pub fn with_general_tagger(mut self, tagger: TaggerConfig) -> Self {
        self.config.taggers.general = tagger;
        self
    }

    /// Use a remote NER service for the clinical tagger.
    pub fn with_remote_clinical_tagger(self, base_url: impl Into<String>) -> Self {
        self.with_clinical_tagger(TaggerConfig::Remote(RemoteTaggerConfig::new(base_url)))
    }

    /// Use a remote NER service for the general tagger.
    pub fn with_remote_general_tagger(self, base_url: impl Into<String>) -> Self {
        self.with_general_tagger(TaggerConfig::Remote(RemoteTaggerConfig::new(base_url)))
    }

    /// Merge a lexicon file into the rule-based clinical tagger.
    pub fn with_clinical_lexicon<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let mut rules = match self.config.taggers.clinical {
            TaggerConfig::Rules(rules) => rules,
            TaggerConfig::Remote(_) => RuleTaggerConfig::clinical(),
        };
        rules.lexicon_path = Some(path.into());
        self.config.taggers.clinical = TaggerConfig::Rules(rules);
        self
    }

    /// Set how age mentions are captured.
    pub fn with_age_capture(mut self, capture: AgeCapture) -> Self {
        self.config.extraction.age_capture = capture;
        self
    }

    /// Set the labels the general tagger uses for people.
    pub fn with_general_person_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extraction.general_person_labels =
            labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Log to a file instead of stdout.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self.config.logging.stdout = false;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClinexConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}
