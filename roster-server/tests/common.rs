use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use roster_core::worker::RequestProcessor;
use roster_server::{
    infra::{app_state::AppState, config::Config},
    routes::create_app,
};

pub const TEST_DELAY_MS: u64 = 50;
pub const TEST_USER_COUNT: usize = 200;

/// Config tuned for fast, deterministic tests.
#[allow(unused)]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.worker.processing_delay_ms = TEST_DELAY_MS;
    config.directory.user_count = TEST_USER_COUNT;
    config.directory.seed = Some(42);
    config.streaming.paragraphs = 2;
    config.streaming.char_delay_ms = 1;
    config
}

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub fn build_test_server() -> Result<(TestServer, AppState)> {
    build_test_server_with_state(AppState::from_config(test_config()))
}

#[allow(unused)]
pub fn build_test_server_with_processor(
    processor: Arc<dyn RequestProcessor>,
) -> Result<(TestServer, AppState)> {
    build_test_server_with_state(AppState::with_processor(
        test_config(),
        processor,
    ))
}

#[allow(unused)]
pub fn build_test_server_with_state(
    state: AppState,
) -> Result<(TestServer, AppState)> {
    let server = TestServer::builder()
        .http_transport()
        .build(create_app(state.clone()))
        .map_err(|err| anyhow!(err.to_string()))?;
    Ok((server, state))
}
