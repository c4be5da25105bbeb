//! Tagger configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for the two taggers the pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggersConfig {
    /// Clinical-domain tagger (drugs, strengths, diagnoses, ...)
    pub clinical: TaggerConfig,

    /// General-purpose tagger, consulted for people only
    pub general: TaggerConfig,
}

impl Default for TaggersConfig {
    fn default() -> Self {
        Self {
            clinical: TaggerConfig::Rules(RuleTaggerConfig::clinical()),
            general: TaggerConfig::Rules(RuleTaggerConfig::general()),
        }
    }
}

/// How a single tagger is provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaggerConfig {
    /// Local lexicon and regex rules
    Rules(RuleTaggerConfig),
    /// External NER service over HTTP
    Remote(RemoteTaggerConfig),
}

impl TaggerConfig {
    /// Short name of the provider kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TaggerConfig::Rules(_) => "rules",
            TaggerConfig::Remote(_) => "remote",
        }
    }
}

/// Configuration for a rule-based tagger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTaggerConfig {
    /// Optional lexicon file (TOML, YAML or JSON) mapping labels to term lists.
    /// Its terms are added to `terms`.
    pub lexicon_path: Option<PathBuf>,

    /// Inline lexicon: label -> terms, matched case-insensitively on word boundaries
    pub terms: BTreeMap<String, Vec<String>>,

    /// Regex rules
    pub patterns: Vec<PatternRule>,
}

/// A regex rule producing spans with a fixed label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Label assigned to each match
    pub label: String,

    /// Regular expression
    pub pattern: String,

    /// Capture group used as the span (whole match when absent)
    #[serde(default)]
    pub group: Option<usize>,
}

impl PatternRule {
    /// Create a rule that labels whole matches.
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            group: None,
        }
    }

    /// Use a capture group instead of the whole match.
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }
}

/// Unit the remote service reports offsets in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values, as spaCy reports `start_char`/`end_char`
    #[default]
    Chars,
    /// UTF-8 bytes
    Bytes,
}

/// Configuration for a remote NER service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteTaggerConfig {
    /// Base URL of the service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Unit of the offsets in responses
    pub offsets: OffsetUnit,

    /// Probe `GET {base_url}/health` once when loading
    pub health_check: bool,
}

impl Default for RemoteTaggerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8765".to_string(),
            timeout_secs: 30,
            offsets: OffsetUnit::Chars,
            health_check: true,
        }
    }
}

impl RemoteTaggerConfig {
    /// Create a configuration pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
