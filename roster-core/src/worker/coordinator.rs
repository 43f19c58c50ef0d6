//! Submission, background processing and event publication.

use std::sync::Arc;

use roster_model::{
    ChannelEvent, ClearResponse, QueuedRequest, RequestCompleted, RequestFailed,
    RequestId, RequestListResponse, SubmitResponse, now_millis,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{EventPublisher, RequestProcessor, RequestStore};
use crate::error::Result;

/// `message` of every submit response.
pub const SUBMITTED_MESSAGE: &str = "Request queued for processing";
/// `message` of every clear response.
pub const CLEARED_MESSAGE: &str = "All requests cleared";
/// `error` field of every `request-error` event.
pub const PROCESSING_FAILED: &str = "Processing failed";

/// Accepts submissions, runs each one on its own task and reports the
/// outcome through the publisher.
///
/// Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct QueueCoordinator {
    store: Arc<RequestStore>,
    processor: Arc<dyn RequestProcessor>,
    publisher: Arc<dyn EventPublisher>,
}

impl std::fmt::Debug for QueueCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueCoordinator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl QueueCoordinator {
    /// A coordinator with an empty store.
    pub fn new(
        processor: Arc<dyn RequestProcessor>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store: Arc::new(RequestStore::new()),
            processor,
            publisher,
        }
    }

    /// The shared record store.
    pub fn store(&self) -> &Arc<RequestStore> {
        &self.store
    }

    /// Records a pending request and starts processing it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self) -> SubmitResponse {
        let (response, _handle) = self.submit_tracked();
        response
    }

    /// Like [`submit`](Self::submit), also returning the processing task.
    pub fn submit_tracked(&self) -> (SubmitResponse, JoinHandle<()>) {
        let id = self.store.next_id();
        let record = self.store.create(id.clone());
        info!(request_id = %id, "request queued");

        let handle = tokio::spawn(run_job(
            id,
            Arc::clone(&self.store),
            Arc::clone(&self.processor),
            Arc::clone(&self.publisher),
        ));

        let response = SubmitResponse {
            request_id: record.id,
            status: record.status,
            message: SUBMITTED_MESSAGE.to_string(),
            timestamp: record.timestamp,
        };
        (response, handle)
    }

    /// Current record for `id`, or [`QueueError::NotFound`](crate::QueueError::NotFound).
    pub fn status(&self, id: &str) -> Result<QueuedRequest> {
        self.store.get(id)
    }

    /// Every record in submission order, with status counts.
    pub fn list_all(&self) -> RequestListResponse {
        RequestListResponse::from_requests(self.store.list_all())
    }

    /// Drops every record. Jobs still running finish but their records are
    /// gone.
    pub fn clear_all(&self) -> ClearResponse {
        let removed = self.store.clear();
        info!(removed, "cleared all requests");
        ClearResponse {
            message: CLEARED_MESSAGE.to_string(),
            timestamp: now_millis(),
        }
    }
}

async fn run_job(
    id: RequestId,
    store: Arc<RequestStore>,
    processor: Arc<dyn RequestProcessor>,
    publisher: Arc<dyn EventPublisher>,
) {
    match processor.process().await {
        Ok(text) => {
            if !store.complete(&id, text.clone()) {
                // Cleared while processing; nobody tracks it anymore.
                debug!(request_id = %id, "completed request no longer stored");
                return;
            }
            info!(request_id = %id, "request completed");
            publisher
                .publish(ChannelEvent::RequestCompleted(RequestCompleted {
                    request_id: id,
                    result: text,
                    timestamp: now_millis(),
                }))
                .await;
        }
        Err(err) => {
            error!(request_id = %id, error = %err, "request processing failed");
            store.complete(&id, format!("Error: {err}"));
            publisher
                .publish(ChannelEvent::RequestError(RequestFailed {
                    request_id: id,
                    error: PROCESSING_FAILED.to_string(),
                    timestamp: now_millis(),
                }))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, time::Duration};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use roster_model::RequestStatus;

    use super::*;
    use crate::{
        QueueError,
        worker::{SimulatedProcessor, processor::MockRequestProcessor},
    };

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<ChannelEvent>>,
    }

    impl RecordingPublisher {
        fn events(&self) -> Vec<ChannelEvent> {
            self.events.lock().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: ChannelEvent) {
            self.events.lock().push(event);
        }
    }

    fn simulated(
        delay_ms: u64,
    ) -> (QueueCoordinator, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::default());
        let coordinator = QueueCoordinator::new(
            Arc::new(SimulatedProcessor::new(Duration::from_millis(delay_ms))),
            publisher.clone(),
        );
        (coordinator, publisher)
    }

    #[tokio::test(start_paused = true)]
    async fn submitted_request_is_listed_as_pending() {
        let (queue, _) = simulated(2000);
        let response = queue.submit();

        assert_eq!(response.status, RequestStatus::Pending);
        assert_eq!(response.message, SUBMITTED_MESSAGE);

        let listing = queue.list_all();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.pending, 1);
        assert_eq!(listing.completed, 0);
        assert_eq!(listing.requests[0].id, response.request_id);
    }

    #[tokio::test(start_paused = true)]
    async fn request_completes_after_delay_and_is_broadcast() {
        let (queue, publisher) = simulated(2000);
        let (response, handle) = queue.submit_tracked();

        handle.await.unwrap();

        let record = queue.status(response.request_id.as_str()).unwrap();
        assert_eq!(record.status, RequestStatus::Completed);
        let result = record.result.unwrap();
        assert!(!result.is_empty());

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ChannelEvent::RequestCompleted(event) => {
                assert_eq!(event.request_id, response.request_id);
                assert_eq!(event.result, result);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn every_submission_completes_without_a_worker_limit() {
        let (queue, publisher) = simulated(2000);
        let handles: Vec<_> =
            (0..20).map(|_| queue.submit_tracked().1).collect();

        tokio::time::sleep(Duration::from_millis(2100)).await;
        for handle in handles {
            handle.await.unwrap();
        }

        let listing = queue.list_all();
        assert_eq!(listing.completed, 20);
        assert_eq!(listing.pending, 0);
        assert_eq!(publisher.events().len(), 20);
    }

    #[tokio::test]
    async fn failing_processor_completes_with_error_text() {
        let mut processor = MockRequestProcessor::new();
        processor
            .expect_process()
            .times(1)
            .returning(|| Err(QueueError::Processing("disk on fire".into())));
        let publisher = Arc::new(RecordingPublisher::default());
        let queue =
            QueueCoordinator::new(Arc::new(processor), publisher.clone());

        let (response, handle) = queue.submit_tracked();
        handle.await.unwrap();

        let record = queue.status(response.request_id.as_str()).unwrap();
        assert_eq!(record.status, RequestStatus::Completed);
        assert!(record.result.unwrap().starts_with("Error: "));

        match publisher.events().as_slice() {
            [ChannelEvent::RequestError(event)] => {
                assert_eq!(event.request_id, response.request_id);
                assert_eq!(event.error, PROCESSING_FAILED);
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_status_is_not_found() {
        let (queue, _) = simulated(10);
        assert!(matches!(
            queue.status("req_1_1"),
            Err(QueueError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_all_is_idempotent_and_suppresses_late_completions() {
        let (queue, publisher) = simulated(2000);
        let (_, handle) = queue.submit_tracked();

        let first = queue.clear_all();
        let second = queue.clear_all();
        assert_eq!(first.message, CLEARED_MESSAGE);
        assert_eq!(second.message, CLEARED_MESSAGE);

        handle.await.unwrap();
        assert_eq!(queue.list_all(), RequestListResponse::default());
        assert!(publisher.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn ids_stay_unique_over_a_thousand_submissions() {
        let (queue, _) = simulated(1);
        let ids: HashSet<_> =
            (0..1000).map(|_| queue.submit().request_id).collect();
        assert_eq!(ids.len(), 1000);
    }
}
