//! # Clinex
//!
//! Entity extraction for free-text clinical notes. Two named-entity taggers,
//! one clinical and one general-purpose, run over each note. A regex pass
//! picks up patient ages, and their overlapping output is reconciled into a
//! single deduplicated set of entities per category.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinex::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let manager = init_with_defaults().await?;
//!
//!     let note = manager
//!         .submit_note("45-year-old man. Take Aspirin 81mg once daily.")
//!         .await?;
//!
//!     for (category, values) in note.entities.iter() {
//!         println!("{}: {:?}", category, values);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciliation
//!
//! Clinical spans win. A general-purpose `PERSON` span is kept only if it
//! does not overlap any non-person clinical span, so a drug name such as
//! "Smithadol" is never reported as a person. See
//! [`extraction::EntityReconciler`] for the full rules.
//!
//! The taggers themselves are pluggable through [`taggers::Tagger`]: the
//! defaults are offline rule-based taggers, and [`taggers::RemoteTagger`]
//! calls an external NER service.

pub mod config;
pub mod core;
pub mod extraction;
pub mod logging;
pub mod storage;
pub mod taggers;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::{init, init_with_defaults};

    pub use crate::config::{ClinexConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel};

    pub use crate::extraction::{
        AgeCapture, Category, EntityReconciler, EntitySet, ExtractionConfig, ExtractionPipeline,
        ExtractionRequest, Span,
    };

    pub use crate::taggers::{RemoteTagger, RuleTagger, Tagger, TaggerConfig};

    pub use crate::core::{HealthReport, NoteManager, TaggerStatus};

    pub use crate::storage::{ClinicalNote, NoteStore, StorageConfig, StorageError};

    pub use crate::{ClinexError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Clinex operations
#[derive(Debug, thiserror::Error)]
pub enum ClinexError {
    /// The submitted note text was empty
    #[error("No text provided")]
    EmptyInput,

    /// A tagger failed to load at startup, so extraction cannot run
    #[error("Tagger '{name}' is unavailable: {reason}")]
    TaggerUnavailable { name: String, reason: String },

    /// A loaded tagger failed while tagging
    #[error("Tagger error: {0}")]
    Tagger(String),

    /// No stored note has the requested id
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for ClinexError {
    fn from(err: crate::config::ConfigError) -> Self {
        ClinexError::Configuration(err.to_string())
    }
}

/// Result type for Clinex operations
pub type Result<T> = std::result::Result<T, ClinexError>;

/// Initialize Clinex with configuration from files and the environment.
///
/// Loads the first `clinex.*` file found, then applies `CLINEX_` variables.
pub async fn init_with_defaults() -> Result<core::NoteManager> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(config).await
}

/// Initialize Clinex with the provided configuration.
///
/// Sets up logging, opens the note store and loads both taggers once. A
/// tagger that fails to load is reported through
/// [`NoteManager::tagger_status`](core::NoteManager::tagger_status) and
/// makes extraction fail with [`ClinexError::TaggerUnavailable`].
pub async fn init(config: config::ClinexConfig) -> Result<core::NoteManager> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    core::NoteManager::from_config(config).await
}
