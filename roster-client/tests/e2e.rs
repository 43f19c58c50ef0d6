use std::{sync::Arc, time::Duration};

use anyhow::Result;
use roster_client::{
    ApiClient, DirectoryApi, TextStreamClient, WorkerApi, WorkerRequestsSession,
};
use roster_model::{RequestStatus, UserQuery};
use roster_server::{
    infra::{app_state::AppState, config::Config},
    routes::create_app,
};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

fn e2e_config() -> Config {
    let mut config = Config::default();
    config.worker.processing_delay_ms = 200;
    config.directory.user_count = 100;
    config.directory.seed = Some(7);
    config.streaming.paragraphs = 1;
    config.streaming.char_delay_ms = 1;
    config
}

/// Serves a fresh app on an ephemeral port and returns its base URL.
async fn spawn_server() -> Result<String> {
    let app = create_app(AppState::from_config(e2e_config()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// Mounts a session and waits for the channel handshake, after which the
/// server is guaranteed to broadcast to it.
async fn mounted_session(
    base_url: &str,
) -> Result<(WorkerRequestsSession, ApiClient)> {
    let api = ApiClient::new(base_url)?;
    let session =
        WorkerRequestsSession::mount(Arc::new(api.clone()), base_url).await;
    assert!(session.is_connected());

    let status = session.connection_status();
    tokio::time::timeout(Duration::from_secs(5), async {
        while status.connection_id().is_none() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await?;
    Ok((session, api))
}

#[tokio::test]
async fn twenty_concurrent_requests_all_complete() -> Result<()> {
    let base_url = spawn_server().await?;
    let (session, api) = mounted_session(&base_url).await?;

    let ids = session.submit_batch(20).await?;
    assert_eq!(ids.len(), 20);
    assert_eq!(session.counts().pending, 20);

    let counts = session.wait_until_settled(SETTLE_TIMEOUT).await?;
    assert_eq!(counts.completed, 20);
    assert_eq!(counts.pending, 0);
    for request in session.requests() {
        assert_eq!(request.status, RequestStatus::Completed);
        assert!(!request.result.unwrap_or_default().is_empty());
    }

    let listing = api.list().await?;
    assert_eq!(listing.total, 20);
    assert_eq!(listing.completed, 20);
    Ok(())
}

#[tokio::test]
async fn events_for_untracked_requests_are_ignored() -> Result<()> {
    let base_url = spawn_server().await?;
    let (session, api) = mounted_session(&base_url).await?;

    session.submit_batch(2).await?;
    // Submitted outside the session; its completion still reaches the channel.
    let stray = api.submit().await?;

    session.wait_until_settled(SETTLE_TIMEOUT).await?;
    assert!(session.requests().iter().all(|r| r.id != stray.request_id));
    assert_eq!(session.counts().total, 2);

    let status = api.status(stray.request_id.as_str()).await?;
    assert_eq!(status.request_id, stray.request_id);
    Ok(())
}

#[tokio::test]
async fn clearing_an_empty_server_succeeds() -> Result<()> {
    let base_url = spawn_server().await?;
    let (session, _api) = mounted_session(&base_url).await?;

    let response = session.clear_batch().await?;

    assert_eq!(response.message, "All requests cleared");
    assert_eq!(session.counts().total, 0);
    assert!(session.last_error().is_none());
    Ok(())
}

#[tokio::test]
async fn clear_after_batch_empties_both_sides() -> Result<()> {
    let base_url = spawn_server().await?;
    let (session, api) = mounted_session(&base_url).await?;

    session.submit_batch(3).await?;
    session.clear_batch().await?;

    assert_eq!(session.counts().total, 0);
    assert_eq!(api.list().await?.total, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_request_status_is_an_error() -> Result<()> {
    let base_url = spawn_server().await?;
    let api = ApiClient::new(&base_url)?;

    let err = api.status("req_0_0").await.unwrap_err();
    assert!(err.to_string().contains("Request not found"));
    Ok(())
}

#[tokio::test]
async fn session_without_server_is_disconnected() -> Result<()> {
    let api = ApiClient::new("http://127.0.0.1:9")?;
    let session =
        WorkerRequestsSession::mount(Arc::new(api), "http://127.0.0.1:9").await;

    assert!(!session.is_connected());
    assert!(session.submit_batch(1).await.is_err());
    assert_eq!(
        session.last_error().as_deref(),
        Some("Failed to submit requests. Please try again.")
    );
    Ok(())
}

#[tokio::test]
async fn directory_queries_round_trip() -> Result<()> {
    let base_url = spawn_server().await?;
    let api = ApiClient::new(&base_url)?;

    let page = api
        .users(&UserQuery {
            limit: Some(5),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.pagination.total_items, 100);
    assert_eq!(page.pagination.total_pages, 20);

    let filters = api.filters().await?;
    assert!(!filters.top_hobbies.is_empty());
    assert!(!filters.top_nationalities.is_empty());

    assert_eq!(api.health().await?.status, "OK");
    Ok(())
}

#[tokio::test]
async fn text_stream_is_collected_char_by_char() -> Result<()> {
    let base_url = spawn_server().await?;
    let stream = TextStreamClient::new(ApiClient::new(&base_url)?);

    let mut seen = 0usize;
    let text = stream.collect_text(1, |_| seen += 1).await?;

    assert!(!text.is_empty());
    assert_eq!(seen, text.chars().count());
    Ok(())
}
