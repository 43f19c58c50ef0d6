use std::{fmt, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use futures::future::try_join_all;
use parking_lot::Mutex;
use roster_model::{ChannelEvent, ClearResponse, QueuedRequest, RequestId};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    api_client::WorkerApi,
    subscription::{ConnectionStatus, EventSubscription},
    tracker::{RequestTracker, TrackerCounts},
};

pub const SUBMIT_FAILED_MESSAGE: &str =
    "Failed to submit requests. Please try again.";
pub const CLEAR_FAILED_MESSAGE: &str = "Failed to clear requests.";

/// State shared between the session and its channel listener.
#[derive(Debug)]
struct SessionState {
    tracker: Mutex<RequestTracker>,
    counts: watch::Sender<TrackerCounts>,
    last_error: Mutex<Option<String>>,
}

impl SessionState {
    fn apply(&self, event: &ChannelEvent) -> bool {
        let mut tracker = self.tracker.lock();
        let changed = tracker.apply(event);
        if changed {
            self.counts.send_replace(tracker.counts());
        }
        changed
    }

    fn with_tracker<F>(&self, f: F)
    where
        F: FnOnce(&mut RequestTracker),
    {
        let mut tracker = self.tracker.lock();
        f(&mut tracker);
        self.counts.send_replace(tracker.counts());
    }

    fn set_error(&self, message: Option<&str>) {
        *self.last_error.lock() = message.map(str::to_string);
    }
}

/// Client side of the worker demo: submits batches, follows their
/// completion over the notification channel and keeps a local list.
///
/// The session owns at most one channel subscription. Unmounting (or
/// dropping) closes it; jobs already submitted keep running on the server.
pub struct WorkerRequestsSession {
    api: Arc<dyn WorkerApi>,
    state: Arc<SessionState>,
    status: ConnectionStatus,
    listener: Option<JoinHandle<()>>,
}

impl fmt::Debug for WorkerRequestsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerRequestsSession")
            .field("counts", &self.counts())
            .field("connected", &self.is_connected())
            .field("last_error", &self.last_error())
            .finish_non_exhaustive()
    }
}

impl WorkerRequestsSession {
    /// A session with no channel subscription.
    pub fn new(api: Arc<dyn WorkerApi>) -> Self {
        let (counts, _) = watch::channel(TrackerCounts::default());
        Self {
            api,
            state: Arc::new(SessionState {
                tracker: Mutex::new(RequestTracker::new()),
                counts,
                last_error: Mutex::new(None),
            }),
            status: ConnectionStatus::default(),
            listener: None,
        }
    }

    /// Creates a session and subscribes to the channel at `base_url`.
    ///
    /// A failed connection is logged and leaves the session disconnected.
    /// It is not retried.
    pub async fn mount(api: Arc<dyn WorkerApi>, base_url: &str) -> Self {
        let mut session = Self::new(api);
        match EventSubscription::connect(base_url).await {
            Ok(subscription) => session.attach(subscription),
            Err(e) => {
                log::error!("[Session] notification channel unavailable: {:#}", e);
            }
        }
        session
    }

    /// Starts merging events from `subscription` into the tracked list.
    pub fn attach(&mut self, mut subscription: EventSubscription) {
        if let Some(previous) = self.listener.take() {
            previous.abort();
        }
        self.status = subscription.status();

        let state = Arc::clone(&self.state);
        self.listener = Some(tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                match &event {
                    ChannelEvent::Connected(_) => {}
                    ChannelEvent::RequestCompleted(done) => {
                        log::debug!(
                            "[Session] request {} completed",
                            done.request_id
                        );
                    }
                    ChannelEvent::RequestError(failed) => {
                        log::warn!(
                            "[Session] request {} failed: {}",
                            failed.request_id,
                            failed.error
                        );
                    }
                }
                state.apply(&event);
            }
        }));
    }

    /// Submits `count` requests concurrently.
    ///
    /// On success the batch replaces the tracked list, in response order.
    /// If any submission fails nothing from the batch is tracked and the
    /// previous list stays as it was.
    pub async fn submit_batch(&self, count: usize) -> Result<Vec<RequestId>> {
        let submissions = (0..count).map(|_| self.api.submit());
        match try_join_all(submissions).await {
            Ok(batch) => {
                let ids = batch.iter().map(|s| s.request_id.clone()).collect();
                self.state.with_tracker(|tracker| tracker.replace(batch));
                self.state.set_error(None);
                log::info!("[Session] submitted batch of {}", count);
                Ok(ids)
            }
            Err(e) => {
                log::error!("[Session] batch submission failed: {:#}", e);
                self.state.set_error(Some(SUBMIT_FAILED_MESSAGE));
                Err(e.context(SUBMIT_FAILED_MESSAGE))
            }
        }
    }

    /// Clears every request on the server, then the local list.
    pub async fn clear_batch(&self) -> Result<ClearResponse> {
        match self.api.clear().await {
            Ok(response) => {
                self.state.with_tracker(RequestTracker::clear);
                self.state.set_error(None);
                Ok(response)
            }
            Err(e) => {
                log::error!("[Session] clear failed: {:#}", e);
                self.state.set_error(Some(CLEAR_FAILED_MESSAGE));
                Err(e.context(CLEAR_FAILED_MESSAGE))
            }
        }
    }

    /// Merges one event by hand, as the channel listener does.
    pub fn apply_event(&self, event: &ChannelEvent) -> bool {
        self.state.apply(event)
    }

    pub fn counts(&self) -> TrackerCounts {
        *self.state.counts.borrow()
    }

    /// Receiver that observes every change to the counts.
    pub fn watch_counts(&self) -> watch::Receiver<TrackerCounts> {
        self.state.counts.subscribe()
    }

    pub fn requests(&self) -> Vec<QueuedRequest> {
        self.state.tracker.lock().requests().to_vec()
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.status.clone()
    }

    /// User-facing message of the last failed batch operation.
    pub fn last_error(&self) -> Option<String> {
        self.state.last_error.lock().clone()
    }

    /// Waits until no tracked request is pending.
    pub async fn wait_until_settled(
        &self,
        timeout: Duration,
    ) -> Result<TrackerCounts> {
        let mut counts = self.watch_counts();
        let settled = tokio::time::timeout(
            timeout,
            counts.wait_for(TrackerCounts::is_settled),
        )
        .await
        .context("timed out waiting for requests to complete")?
        .context("session state dropped")?;
        Ok(*settled)
    }

    /// Closes the channel subscription.
    pub fn unmount(mut self) {
        self.stop_listener();
    }

    fn stop_listener(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
        self.status.set_connected(false);
    }
}

impl Drop for WorkerRequestsSession {
    fn drop(&mut self) {
        self.stop_listener();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::api_client::MockWorkerApi;
    use roster_model::{
        RequestCompleted, RequestFailed, RequestStatus, SubmitResponse,
    };

    fn submitted(n: usize) -> SubmitResponse {
        SubmitResponse {
            request_id: RequestId::new(format!("req_1_{n}")),
            status: RequestStatus::Pending,
            message: "Request queued for processing".into(),
            timestamp: 1,
        }
    }

    fn counting_api(fail_at: Option<usize>) -> MockWorkerApi {
        let counter = Arc::new(AtomicUsize::new(1));
        let mut api = MockWorkerApi::new();
        api.expect_submit().returning(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if Some(n) == fail_at {
                Err(anyhow::anyhow!("connection refused"))
            } else {
                Ok(submitted(n))
            }
        });
        api
    }

    fn completed(id: &RequestId) -> ChannelEvent {
        ChannelEvent::RequestCompleted(RequestCompleted {
            request_id: id.clone(),
            result: "Lorem ipsum.".into(),
            timestamp: 2,
        })
    }

    #[tokio::test]
    async fn batch_is_tracked_as_pending() {
        let session = WorkerRequestsSession::new(Arc::new(counting_api(None)));

        let ids = session.submit_batch(5).await.unwrap();

        assert_eq!(ids.len(), 5);
        assert_eq!(session.counts().pending, 5);
        assert_eq!(session.requests()[0].id, ids[0]);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn one_failed_submission_fails_the_whole_batch() {
        let session =
            WorkerRequestsSession::new(Arc::new(counting_api(Some(3))));

        let err = session.submit_batch(5).await.unwrap_err();

        assert!(err.to_string().contains(SUBMIT_FAILED_MESSAGE));
        assert_eq!(session.counts().total, 0);
        assert_eq!(session.last_error().as_deref(), Some(SUBMIT_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn events_settle_the_batch() {
        let session = WorkerRequestsSession::new(Arc::new(counting_api(None)));
        let ids = session.submit_batch(2).await.unwrap();

        assert!(session.apply_event(&completed(&ids[0])));
        session.apply_event(&ChannelEvent::RequestError(RequestFailed {
            request_id: ids[1].clone(),
            error: "Processing failed".into(),
            timestamp: 2,
        }));

        let counts = session
            .wait_until_settled(Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(counts.completed, 2);
        assert_eq!(
            session.requests()[1].result.as_deref(),
            Some("Error: Processing failed")
        );
    }

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let session = WorkerRequestsSession::new(Arc::new(counting_api(None)));
        session.submit_batch(1).await.unwrap();

        assert!(!session.apply_event(&completed(&RequestId::from("req_9_9"))));
        assert_eq!(session.counts().pending, 1);
    }

    #[tokio::test]
    async fn failed_clear_keeps_the_list() {
        let mut api = counting_api(None);
        api.expect_clear()
            .returning(|| Err(anyhow::anyhow!("503 Service Unavailable")));
        let session = WorkerRequestsSession::new(Arc::new(api));
        session.submit_batch(3).await.unwrap();

        assert!(session.clear_batch().await.is_err());

        assert_eq!(session.counts().total, 3);
        assert_eq!(session.last_error().as_deref(), Some(CLEAR_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn clear_empties_the_list() {
        let mut api = counting_api(None);
        api.expect_clear().returning(|| {
            Ok(ClearResponse {
                message: "All requests cleared".into(),
                timestamp: 3,
            })
        });
        let session = WorkerRequestsSession::new(Arc::new(api));
        session.submit_batch(3).await.unwrap();

        let response = session.clear_batch().await.unwrap();

        assert_eq!(response.message, "All requests cleared");
        assert_eq!(session.counts(), TrackerCounts::default());
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_on_a_stuck_batch_times_out() {
        let session = WorkerRequestsSession::new(Arc::new(counting_api(None)));
        session.submit_batch(1).await.unwrap();

        let result = session.wait_until_settled(Duration::from_secs(1)).await;
        assert!(result.is_err());
    }

    #[test]
    fn unmounted_session_reports_disconnected() {
        let session = WorkerRequestsSession::new(Arc::new(MockWorkerApi::new()));
        assert!(!session.is_connected());
        session.unmount();
    }
}
