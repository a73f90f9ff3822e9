use serde::{Deserialize, Serialize};

/// Outcome of scoring one text for sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Star rating in `1..=5`.
    pub rating: u8,
    /// Confidence in `[0.0, 1.0]`. Local scoring never exceeds `0.8`.
    pub confidence: f64,
}

/// Which backend produced an [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Remote,
    Local,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Remote => write!(f, "remote"),
            AnalysisSource::Local => write!(f, "local"),
        }
    }
}

/// A result tagged with the backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<T> {
    pub value: T,
    pub source: AnalysisSource,
}

impl<T> Analysis<T> {
    pub(crate) fn local(value: T) -> Self {
        Self {
            value,
            source: AnalysisSource::Local,
        }
    }

    pub(crate) fn remote(value: T) -> Self {
        Self {
            value,
            source: AnalysisSource::Remote,
        }
    }
}
