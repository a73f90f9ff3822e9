use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use vitrine_heuristics::AnalysisSource;

use crate::middleware::RequestId;

use super::{validate_length, ApiError, ApiResponse, AppState};

const MIN_TEXT_CHARS: usize = 50;
const MAX_TEXT_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub(super) struct SummaryRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SummaryData {
    pub summary: String,
    pub source: AnalysisSource,
}

pub(super) async fn summarize_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SummaryRequest>,
) -> Result<Json<ApiResponse<SummaryData>>, ApiError> {
    validate_length(&req_id.0, "text", &body.text, MIN_TEXT_CHARS, MAX_TEXT_CHARS)?;

    let analysis = state.engine.summary(&body.text).await;

    Ok(ApiResponse::new(
        SummaryData {
            summary: analysis.value,
            source: analysis.source,
        },
        req_id.0,
    ))
}
