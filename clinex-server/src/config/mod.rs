//! Server configuration module

use anyhow::Result;
use clinex::config::{ClinexConfig, ConfigLoader};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Origin of the bundled web front end during development
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Origins allowed by CORS; "*" allows any origin
    pub cors_origins: Vec<String>,

    /// Clinex library configuration file
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_request_size: 1024 * 1024, // 1MB
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            config_file: None,
            log_level: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = cli_args.host {
            config.host = host;
        } else if let Ok(host) = env::var("CLINEX_HOST") {
            config.host = host;
        }

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("CLINEX_PORT") {
            config.port = port.parse()?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("CLINEX_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        if !cli_args.cors_origins.is_empty() {
            config.cors_origins = cli_args.cors_origins;
        } else if let Ok(origins) = env::var("CLINEX_CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins);
        }

        if let Some(config_file) = cli_args.config_file {
            config.config_file = Some(config_file);
        } else if let Ok(config_file) = env::var("CLINEX_CONFIG_FILE") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        config.log_level = cli_args.log_level;

        Ok(config)
    }

    /// Library configuration: `config_file` (or the default locations), then
    /// `CLINEX_` environment variables.
    ///
    /// An unreadable file or a configuration that fails validation is an
    /// error, never a fallback to defaults.
    pub fn load_clinex_config(&self) -> clinex::Result<ClinexConfig> {
        let mut loader = ConfigLoader::new();
        match &self.config_file {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        Ok(loader.load_env().extract()?)
    }

    /// Whether CORS should allow any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

/// Split a comma-separated origin list.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec![DEFAULT_CORS_ORIGIN]);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = crate::cli::CliArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9000),
            config_file: None,
            cors_origins: vec!["*".to_string()],
            max_request_size: Some(2048),
            log_level: Some("debug".to_string()),
        };

        let config = ServerConfig::from_cli_and_env(args).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_request_size, 2048);
        assert!(config.allows_any_origin());
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    fn config_with_file(contents: &str) -> (ServerConfig, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinex.toml");
        std::fs::write(&path, contents).unwrap();

        let config = ServerConfig {
            config_file: Some(path),
            ..ServerConfig::default()
        };
        (config, dir)
    }

    #[test]
    fn test_invalid_tagger_config_is_an_error() {
        let (config, _dir) = config_with_file(
            r#"
[taggers.clinical]
type = "remote"
base_url = "http://127.0.0.1:8765"
timeout_secs = 0
"#,
        );

        let err = config.load_clinex_config().unwrap_err();
        assert!(matches!(err, clinex::ClinexError::Configuration(_)));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let config = ServerConfig {
            config_file: Some(PathBuf::from("/nonexistent/clinex.toml")),
            ..ServerConfig::default()
        };

        assert!(config.load_clinex_config().is_err());
    }

    #[test]
    fn test_configured_remote_tagger_is_kept() {
        let (config, _dir) = config_with_file(
            r#"
[taggers.clinical]
type = "remote"
base_url = "http://127.0.0.1:8765"
timeout_secs = 5
"#,
        );

        let clinex_config = config.load_clinex_config().unwrap();
        assert_eq!(clinex_config.taggers.clinical.kind(), "remote");
        assert_eq!(clinex_config.taggers.general.kind(), "rules");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }
}
