use std::{convert::Infallible, time::Duration};

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use roster_core::streaming::{char_stream, generate_text, parse_speed};

use crate::infra::app_state::AppState;

/// GET /api/stream-text at the configured character delay.
pub async fn stream_text_handler(State(state): State<AppState>) -> Response {
    let delay = state.config().streaming.char_delay();
    stream_response(&state, delay)
}

/// GET /api/stream-text/{speed}; `speed` is milliseconds per character.
pub async fn stream_text_with_speed_handler(
    State(state): State<AppState>,
    Path(speed): Path<String>,
) -> Response {
    stream_response(&state, parse_speed(&speed))
}

fn stream_response(state: &AppState, delay: Duration) -> Response {
    let text = generate_text(state.config().streaming.paragraphs);
    tracing::debug!(
        chars = text.chars().count(),
        delay_ms = delay.as_millis() as u64,
        "starting text stream"
    );

    let body = char_stream(text, delay)
        .map(|ch| Ok::<_, Infallible>(ch.to_string()));

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(body),
    )
        .into_response()
}
