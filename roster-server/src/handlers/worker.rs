use axum::{
    Json,
    extract::{Path, State},
};
use roster_model::{
    ClearResponse, RequestListResponse, RequestStatusResponse, SubmitResponse,
};

use crate::infra::{app_state::AppState, errors::AppResult};

/// POST /api/worker/submit. The request body is ignored.
pub async fn submit_request_handler(
    State(state): State<AppState>,
) -> Json<SubmitResponse> {
    Json(state.queue.submit())
}

pub async fn request_status_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<RequestStatusResponse>> {
    let record = state.queue.status(&request_id)?;
    Ok(Json(record.into()))
}

pub async fn list_requests_handler(
    State(state): State<AppState>,
) -> Json<RequestListResponse> {
    Json(state.queue.list_all())
}

pub async fn clear_requests_handler(
    State(state): State<AppState>,
) -> Json<ClearResponse> {
    Json(state.queue.clear_all())
}
