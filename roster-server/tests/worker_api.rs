use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use roster_core::{QueueError, api::routes::api, worker::RequestProcessor};
use roster_model::{
    ClearResponse, ErrorResponse, RequestListResponse, RequestStatus,
    RequestStatusResponse, SubmitResponse,
};

mod common;
use common::{TEST_DELAY_MS, build_test_server, build_test_server_with_processor};

struct FailingProcessor;

#[async_trait]
impl RequestProcessor for FailingProcessor {
    async fn process(&self) -> roster_core::Result<String> {
        Err(QueueError::Processing("simulated outage".into()))
    }
}

async fn wait_for_completion() {
    tokio::time::sleep(Duration::from_millis(TEST_DELAY_MS * 4)).await;
}

#[tokio::test]
async fn submit_returns_pending_record_and_lists_it() -> Result<()> {
    let (server, _) = build_test_server()?;

    let response = server.post(api::worker::SUBMIT).await;
    response.assert_status_ok();
    let submitted: SubmitResponse = response.json();
    assert_eq!(submitted.status, RequestStatus::Pending);
    assert_eq!(submitted.message, "Request queued for processing");
    assert!(submitted.request_id.as_str().starts_with("req_"));

    let listing: RequestListResponse =
        server.get(api::worker::REQUESTS).await.json();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.pending, 1);
    assert_eq!(listing.requests[0].id, submitted.request_id);
    Ok(())
}

#[tokio::test]
async fn submitted_request_completes_with_text() -> Result<()> {
    let (server, _) = build_test_server()?;
    let submitted: SubmitResponse =
        server.post(api::worker::SUBMIT).await.json();

    wait_for_completion().await;

    let status: RequestStatusResponse = server
        .get(&api::worker::status_path(submitted.request_id.as_str()))
        .await
        .json();
    assert_eq!(status.status, RequestStatus::Completed);
    assert!(!status.result.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_status_is_404_with_error_body() -> Result<()> {
    let (server, _) = build_test_server()?;

    let response = server.get(&api::worker::status_path("req_0_0")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Request not found");
    assert!(body.timestamp > 0);
    Ok(())
}

#[tokio::test]
async fn clear_empties_the_listing_and_is_idempotent() -> Result<()> {
    let (server, _) = build_test_server()?;
    for _ in 0..3 {
        server.post(api::worker::SUBMIT).await.assert_status_ok();
    }

    for _ in 0..2 {
        let response = server.delete(api::worker::CLEAR).await;
        response.assert_status_ok();
        let cleared: ClearResponse = response.json();
        assert_eq!(cleared.message, "All requests cleared");
    }

    let listing: RequestListResponse =
        server.get(api::worker::REQUESTS).await.json();
    assert_eq!(listing, RequestListResponse::default());
    Ok(())
}

#[tokio::test]
async fn failed_processing_is_reported_as_completed_error() -> Result<()> {
    let (server, _) = build_test_server_with_processor(Arc::new(FailingProcessor))?;
    let submitted: SubmitResponse =
        server.post(api::worker::SUBMIT).await.json();

    wait_for_completion().await;

    let status: RequestStatusResponse = server
        .get(&api::worker::status_path(submitted.request_id.as_str()))
        .await
        .json();
    assert_eq!(status.status, RequestStatus::Completed);
    assert!(status.result.unwrap_or_default().starts_with("Error: "));

    let listing: RequestListResponse =
        server.get(api::worker::REQUESTS).await.json();
    assert_eq!(listing.completed, 1);
    assert_eq!(listing.pending, 0);
    Ok(())
}
