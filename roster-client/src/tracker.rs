use roster_model::{
    ChannelEvent, QueuedRequest, RequestId, RequestStatus, SubmitResponse,
};

/// Status counts over the tracked batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TrackerCounts {
    /// True once every tracked request reached a terminal state.
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }
}

/// Local copy of the current batch, merged with channel events.
///
/// Records keep submission order. Events for ids outside the batch are
/// dropped, which covers events from an earlier batch or another client.
#[derive(Debug, Default)]
pub struct RequestTracker {
    requests: Vec<QueuedRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tracked list with a fresh batch of pending records.
    pub fn replace(&mut self, batch: Vec<SubmitResponse>) {
        self.requests = batch
            .into_iter()
            .map(|submitted| {
                QueuedRequest::pending(submitted.request_id, submitted.timestamp)
            })
            .collect();
    }

    /// Merges one channel event. Returns whether a tracked record changed.
    pub fn apply(&mut self, event: &ChannelEvent) -> bool {
        match event {
            ChannelEvent::Connected(_) => false,
            ChannelEvent::RequestCompleted(done) => {
                self.complete(&done.request_id, done.result.clone())
            }
            ChannelEvent::RequestError(failed) => self.complete(
                &failed.request_id,
                format!("Error: {}", failed.error),
            ),
        }
    }

    fn complete(&mut self, id: &RequestId, result: String) -> bool {
        let Some(request) = self.requests.iter_mut().find(|r| &r.id == id)
        else {
            log::debug!("[Tracker] ignoring event for untracked {}", id);
            return false;
        };
        request.status = RequestStatus::Completed;
        request.result = Some(result);
        true
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    pub fn counts(&self) -> TrackerCounts {
        let completed = self
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Completed)
            .count();
        TrackerCounts {
            total: self.requests.len(),
            pending: self.requests.len() - completed,
            completed,
        }
    }

    pub fn requests(&self) -> &[QueuedRequest] {
        &self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
