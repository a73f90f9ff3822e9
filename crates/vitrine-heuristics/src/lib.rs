//! Local text heuristics for the Vitrine storefront.
//!
//! Three independent operations over immutable tables: a lexicon sentiment
//! scorer, a frequency-based extractive summarizer, and a keyword product
//! recommender. [`Engine`] optionally fronts them with a remote AI service
//! and falls back to the local heuristics whenever that service fails.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod recommender;
pub mod remote;
pub mod scorer;
pub mod summarizer;
pub mod types;

pub use catalog::{Catalog, CatalogEntry, KeywordRule};
pub use engine::Engine;
pub use error::HeuristicsError;
pub use recommender::{recommend, recommend_with, FALLBACK_RECOMMENDATIONS, MAX_RECOMMENDATIONS};
pub use remote::RemoteClient;
pub use scorer::{score, score_with, Lexicon, MAX_CONFIDENCE};
pub use summarizer::summarize;
pub use types::{Analysis, AnalysisSource, SentimentResult};
