//! Named-entity taggers that feed the reconciler.
//!
//! A tagger turns raw text into [`Span`]s. The clinical and general-purpose
//! taggers are both expressed through the same [`Tagger`] trait, so the
//! extraction pipeline can run against remote services, local rules or test
//! fakes without knowing which is which.

mod config;
mod rules;
mod remote;

pub use config::*;
pub use rules::*;
pub use remote::*;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::Result;
use crate::extraction::Span;

/// Trait for producing labeled spans from text.
#[async_trait]
pub trait Tagger: Send + Sync {
    /// Tag `text`, returning spans in the order the tagger emits them.
    ///
    /// Offsets must be byte offsets into `text`.
    async fn tag(&self, text: &str) -> Result<Vec<Span>>;

    /// Name of this tagger for logs and health reporting.
    fn name(&self) -> &str;

    /// Kind of provider behind this tagger, e.g. "rules" or "remote".
    fn provider(&self) -> &str {
        "custom"
    }
}

/// Build a tagger from configuration.
///
/// This is the one place a tagger is loaded; callers hold the returned
/// instance for the life of the process.
pub async fn load_tagger(name: &str, config: &TaggerConfig) -> Result<Arc<dyn Tagger>> {
    let tagger: Arc<dyn Tagger> = match config {
        TaggerConfig::Rules(rules) => Arc::new(RuleTagger::from_config(name, rules)?),
        TaggerConfig::Remote(remote) => Arc::new(RemoteTagger::load(name, remote).await?),
    };
    info!(tagger = name, kind = config.kind(), "Tagger loaded");
    Ok(tagger)
}
