//! Tagger backed by an external NER service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{OffsetUnit, RemoteTaggerConfig, Tagger};
use crate::extraction::Span;
use crate::{ClinexError, Result};

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    entities: Vec<NerEntity>,
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    label: String,
    text: String,
    start: usize,
    end: usize,
}

/// Tagger that posts text to an HTTP NER service.
///
/// The service is expected to answer `POST {base_url}/ner` with
/// `{"entities": [{"label", "text", "start", "end"}]}`. Offsets reported in
/// characters are converted to byte offsets before they leave this tagger.
#[derive(Debug)]
pub struct RemoteTagger {
    name: String,
    client: reqwest::Client,
    endpoint: String,
    offsets: OffsetUnit,
}

impl RemoteTagger {
    /// Create the client and, if configured, probe the service once.
    ///
    /// Any failure is reported as [`ClinexError::TaggerUnavailable`].
    pub async fn load(name: &str, config: &RemoteTaggerConfig) -> Result<Self> {
        let unavailable = |reason: String| ClinexError::TaggerUnavailable {
            name: name.to_string(),
            reason,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| unavailable(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/');

        if config.health_check {
            let health_url = format!("{}/health", base_url);
            let response = client
                .get(&health_url)
                .send()
                .await
                .map_err(|e| unavailable(format!("Health check failed: {}", e)))?;
            if !response.status().is_success() {
                warn!(tagger = name, status = %response.status(), "NER service unhealthy");
                return Err(unavailable(format!(
                    "Health check returned {}",
                    response.status()
                )));
            }
        }

        Ok(Self {
            name: name.to_string(),
            client,
            endpoint: format!("{}/ner", base_url),
            offsets: config.offsets,
        })
    }
}

#[async_trait]
impl Tagger for RemoteTagger {
    async fn tag(&self, text: &str) -> Result<Vec<Span>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&NerRequest { text })
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ClinexError::Tagger(format!("{}: request failed: {}", self.name, e)))?;

        let body: NerResponse = response
            .json()
            .await
            .map_err(|e| ClinexError::Tagger(format!("{}: invalid response: {}", self.name, e)))?;

        debug!(tagger = %self.name, entities = body.entities.len(), "Remote tagging complete");

        let spans = body
            .entities
            .into_iter()
            .map(|entity| Span::new(entity.label, entity.text, entity.start, entity.end))
            .collect();

        match self.offsets {
            OffsetUnit::Bytes => Ok(spans),
            OffsetUnit::Chars => chars_to_bytes(text, spans)
                .map_err(|e| ClinexError::Tagger(format!("{}: {}", self.name, e))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn provider(&self) -> &str {
        "remote"
    }
}

/// Rewrite character offsets as byte offsets into `text`.
fn chars_to_bytes(text: &str, spans: Vec<Span>) -> std::result::Result<Vec<Span>, String> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();

    let to_byte = |offset: usize| {
        boundaries
            .get(offset)
            .copied()
            .ok_or_else(|| format!("offset {} is past the end of the text", offset))
    };

    spans
        .into_iter()
        .map(|span| {
            Ok(Span {
                start: to_byte(span.start)?,
                end: to_byte(span.end)?,
                ..span
            })
        })
        .collect()
}
