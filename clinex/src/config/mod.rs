//! Configuration system for Clinex.
//!
//! Configuration is layered with figment: built-in defaults, then the first
//! config file found, then `CLINEX_`-prefixed environment variables. Nested
//! keys use a double underscore, e.g. `CLINEX_STORAGE__ENGINE=rocksdb`.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "clinex.toml",
    "clinex.yaml",
    "clinex.yml",
    "clinex.json",
    ".clinex/config.toml",
    ".clinex/config.yaml",
    ".clinex/config.yml",
    ".clinex/config.json",
];

/// Environment variable prefix for Clinex configuration
pub const ENV_PREFIX: &str = "CLINEX_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
