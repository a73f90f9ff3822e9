//! HTTP client for a remote AI service exposing the same three operations.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::HeuristicsError;
use crate::recommender::MAX_RECOMMENDATIONS;
use crate::types::SentimentResult;

/// Remote AI HTTP client.
///
/// Posts `{"text": ..}` / `{"description": ..}` bodies to
/// `{base_url}/sentiment`, `{base_url}/summary` and
/// `{base_url}/recommendations`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct DescriptionRequest<'a> {
    description: &'a str,
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Deserialize)]
struct RecommendationsResponse {
    recommendations: Vec<String>,
}

impl RemoteClient {
    /// Create a new `RemoteClient`.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::Http`] if the underlying HTTP client cannot
    /// be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, HeuristicsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the remote service for a sentiment rating.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::Remote`] on transport failure, non-success
    /// status, unparseable body, or a rating/confidence out of bounds.
    pub async fn sentiment(&self, text: &str) -> Result<SentimentResult, HeuristicsError> {
        let result: SentimentResult = self.post("sentiment", &TextRequest { text }).await?;

        if !(1..=5).contains(&result.rating) {
            return Err(HeuristicsError::Remote(format!(
                "rating {} outside 1..=5",
                result.rating
            )));
        }
        if !(0.0..=1.0).contains(&result.confidence) {
            return Err(HeuristicsError::Remote(format!(
                "confidence {} outside [0, 1]",
                result.confidence
            )));
        }

        Ok(result)
    }

    /// Ask the remote service for a summary.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::Remote`] on failure or an empty summary.
    pub async fn summary(&self, text: &str) -> Result<String, HeuristicsError> {
        let response: SummaryResponse = self.post("summary", &TextRequest { text }).await?;
        if response.summary.trim().is_empty() {
            return Err(HeuristicsError::Remote("empty summary".to_string()));
        }
        Ok(response.summary)
    }

    /// Ask the remote service for product recommendations.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::Remote`] on failure, or when the list is
    /// empty or longer than [`MAX_RECOMMENDATIONS`].
    pub async fn recommendations(&self, description: &str) -> Result<Vec<String>, HeuristicsError> {
        let response: RecommendationsResponse = self
            .post("recommendations", &DescriptionRequest { description })
            .await?;

        let count = response.recommendations.len();
        if count == 0 || count > MAX_RECOMMENDATIONS {
            return Err(HeuristicsError::Remote(format!(
                "expected 1..={MAX_RECOMMENDATIONS} recommendations, got {count}"
            )));
        }

        Ok(response.recommendations)
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, HeuristicsError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HeuristicsError::Remote(format!("{endpoint} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(HeuristicsError::Remote(format!(
                "{endpoint} returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| HeuristicsError::Remote(format!("{endpoint} response parse error: {e}")))
    }
}
