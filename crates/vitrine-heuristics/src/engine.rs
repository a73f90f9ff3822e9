//! Remote-first analysis with local heuristic fallback.

use vitrine_core::AppConfig;

use crate::catalog::Catalog;
use crate::error::HeuristicsError;
use crate::recommender::recommend_with;
use crate::remote::RemoteClient;
use crate::scorer::{score_with, Lexicon};
use crate::summarizer::summarize;
use crate::types::{Analysis, SentimentResult};

/// Entry point for the three text operations.
///
/// When a [`RemoteClient`] is attached every call tries it first. Any remote
/// failure is logged and answered by the local heuristics, so callers always
/// receive a result.
#[derive(Debug, Clone)]
pub struct Engine {
    remote: Option<RemoteClient>,
    catalog: Catalog,
    lexicon: Lexicon<'static>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::local()
    }
}

impl Engine {
    /// Local-only engine over the built-in lexicon and catalog.
    #[must_use]
    pub fn local() -> Self {
        Self {
            remote: None,
            catalog: Catalog::builtin().clone(),
            lexicon: Lexicon::french(),
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: RemoteClient) -> Self {
        self.remote = Some(remote);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_lexicon(mut self, lexicon: Lexicon<'static>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Build an engine from application config.
    ///
    /// Loads `catalog_path` when set and attaches a remote client when
    /// `remote_ai_url` is set.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError`] if the catalog file is unreadable or
    /// invalid, or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, HeuristicsError> {
        let mut engine = Self::local();

        if let Some(path) = &config.catalog_path {
            engine = engine.with_catalog(Catalog::load(path)?);
            tracing::info!(path = %path.display(), "loaded product catalog");
        }

        if let Some(url) = &config.remote_ai_url {
            let client = RemoteClient::new(
                url,
                config.remote_ai_api_key.clone(),
                config.remote_ai_timeout_secs,
            )?;
            engine = engine.with_remote(client);
            tracing::info!(url = %url, "remote AI enabled with local fallback");
        }

        Ok(engine)
    }

    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rate the sentiment of `text`.
    pub async fn sentiment(&self, text: &str) -> Analysis<SentimentResult> {
        if let Some(remote) = &self.remote {
            match remote.sentiment(text).await {
                Ok(result) => return Analysis::remote(result),
                Err(e) => {
                    tracing::warn!(error = %e, "remote sentiment failed; using local scorer");
                }
            }
        }
        Analysis::local(self.local_sentiment(text))
    }

    /// Summarize `text`.
    pub async fn summary(&self, text: &str) -> Analysis<String> {
        if let Some(remote) = &self.remote {
            match remote.summary(text).await {
                Ok(summary) => return Analysis::remote(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "remote summary failed; using local summarizer");
                }
            }
        }
        Analysis::local(summarize(text))
    }

    /// Recommend products for `description`.
    pub async fn recommendations(&self, description: &str) -> Analysis<Vec<String>> {
        if let Some(remote) = &self.remote {
            match remote.recommendations(description).await {
                Ok(products) => return Analysis::remote(products),
                Err(e) => {
                    tracing::warn!(error = %e, "remote recommendations failed; using local recommender");
                }
            }
        }
        Analysis::local(self.local_recommendations(description))
    }

    #[must_use]
    pub fn local_sentiment(&self, text: &str) -> SentimentResult {
        score_with(&self.lexicon, text)
    }

    /// Local recommendations drawn with thread-local entropy.
    #[must_use]
    pub fn local_recommendations(&self, description: &str) -> Vec<String> {
        recommend_with(&self.catalog, description, &mut rand::rng())
    }
}
