use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use vitrine_heuristics::AnalysisSource;

use crate::middleware::RequestId;

use super::{validate_length, ApiError, ApiResponse, AppState};

const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_DESCRIPTION_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendationsData {
    pub recommendations: Vec<String>,
    pub source: AnalysisSource,
}

pub(super) async fn recommend_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RecommendationsRequest>,
) -> Result<Json<ApiResponse<RecommendationsData>>, ApiError> {
    validate_length(
        &req_id.0,
        "description",
        &body.description,
        MIN_DESCRIPTION_CHARS,
        MAX_DESCRIPTION_CHARS,
    )?;

    let analysis = state.engine.recommendations(&body.description).await;
    tracing::debug!(
        count = analysis.value.len(),
        source = %analysis.source,
        "recommendations built"
    );

    Ok(ApiResponse::new(
        RecommendationsData {
            recommendations: analysis.value,
            source: analysis.source,
        },
        req_id.0,
    ))
}
