use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use roster_core::api::routes::api;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        directory::{filters_handler, health_handler, users_handler},
        handle_websocket::websocket_handler,
        streaming::{stream_text_handler, stream_text_with_speed_handler},
        worker::{
            clear_requests_handler, list_requests_handler,
            request_status_handler, submit_request_handler,
        },
    },
    infra::{app_state::AppState, config::CorsConfig},
};

/// Every Roster route, without state or layers.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(api::HEALTH, get(health_handler))
        // Worker queue
        .route(api::worker::SUBMIT, post(submit_request_handler))
        .route(api::worker::STATUS, get(request_status_handler))
        .route(api::worker::REQUESTS, get(list_requests_handler))
        .route(api::worker::CLEAR, delete(clear_requests_handler))
        // Directory
        .route(api::directory::USERS, get(users_handler))
        .route(api::directory::FILTERS, get(filters_handler))
        // Streaming
        .route(api::streaming::TEXT, get(stream_text_handler))
        .route(
            api::streaming::TEXT_WITH_SPEED,
            get(stream_text_with_speed_handler),
        )
        // Notification channel
        .route(api::channel::WS, get(websocket_handler))
        .route(api::channel::SOCKET, get(websocket_handler))
}

/// The full application: routes, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config().cors);

    create_api_router()
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE]))
}
