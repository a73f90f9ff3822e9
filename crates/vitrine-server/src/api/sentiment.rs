use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use vitrine_heuristics::AnalysisSource;

use crate::middleware::RequestId;

use super::{validate_length, ApiError, ApiResponse, AppState};

const MIN_TEXT_CHARS: usize = 1;
const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Deserialize)]
pub(super) struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SentimentData {
    pub rating: u8,
    pub confidence: f64,
    pub source: AnalysisSource,
}

pub(super) async fn analyze_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SentimentRequest>,
) -> Result<Json<ApiResponse<SentimentData>>, ApiError> {
    validate_length(&req_id.0, "text", &body.text, MIN_TEXT_CHARS, MAX_TEXT_CHARS)?;

    let analysis = state.engine.sentiment(&body.text).await;
    tracing::debug!(
        rating = analysis.value.rating,
        source = %analysis.source,
        "sentiment scored"
    );

    Ok(ApiResponse::new(
        SentimentData {
            rating: analysis.value.rating,
            confidence: analysis.value.confidence,
            source: analysis.source,
        },
        req_id.0,
    ))
}
