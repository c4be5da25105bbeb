//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;
use crate::extraction::ExtractionConfig;
use crate::storage::{StorageConfig, StorageEngine};
use crate::taggers::{TaggerConfig, TaggersConfig};

/// Validate the entire configuration.
pub fn validate_config(config: &ClinexConfig) -> Result<(), ConfigError> {
    validate_extraction_config(&config.extraction)?;
    validate_taggers_config(&config.taggers)?;
    validate_storage_config(&config.storage)?;

    Ok(())
}

fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.clinical_person_label.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Clinical person label cannot be empty".to_string(),
        ));
    }

    if config.general_person_labels.is_empty()
        || config
            .general_person_labels
            .iter()
            .any(|label| label.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "General person labels must contain at least one non-empty label".to_string(),
        ));
    }

    Ok(())
}

fn validate_taggers_config(config: &TaggersConfig) -> Result<(), ConfigError> {
    for (role, tagger) in [("clinical", &config.clinical), ("general", &config.general)] {
        if let TaggerConfig::Remote(remote) = tagger {
            let url = remote.base_url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "The {} tagger base_url must be an http(s) URL, got '{}'",
                    role, remote.base_url
                )));
            }
            if remote.timeout_secs == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "The {} tagger timeout must be greater than 0",
                    role
                )));
            }
        }
    }

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.namespace.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB namespace cannot be empty".to_string(),
        ));
    }
    if config.database.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB database cannot be empty".to_string(),
        ));
    }
    if config.engine == StorageEngine::RocksDb && config.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "RocksDB storage requires a path".to_string(),
        ));
    }

    Ok(())
}
