use axum::{extract::State, Extension, Json};
use vitrine_heuristics::CatalogEntry;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

pub(super) async fn list_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CatalogEntry>>> {
    ApiResponse::new(state.engine.catalog().categories.clone(), req_id.0)
}
