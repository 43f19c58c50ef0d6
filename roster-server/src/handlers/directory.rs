use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{SecondsFormat, Utc};
use roster_model::{FiltersResponse, HealthResponse, UserQuery, UsersResponse};

use crate::infra::{app_state::AppState, errors::AppResult};

/// GET /api/users. Malformed `page`/`limit` values are a 400.
pub async fn users_handler(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult<Json<UsersResponse>> {
    let Query(query) = query?;
    Ok(Json(state.directory.query(&query)))
}

pub async fn filters_handler(
    State(state): State<AppState>,
) -> Json<FiltersResponse> {
    Json(state.directory.filters().clone())
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
