//! In-memory request records.

use std::collections::HashMap;

use parking_lot::Mutex;
use roster_model::{QueuedRequest, RequestId, RequestStatus, now_millis};

use crate::error::{QueueError, Result};

/// In-memory request records keyed by id, listed in insertion order.
///
/// Every mutation takes the single store lock for its whole
/// read/modify/write, so concurrent completions and clears never interleave
/// inside one operation.
#[derive(Debug, Default)]
pub struct RequestStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: HashMap<RequestId, QueuedRequest>,
    order: Vec<RequestId>,
    counter: u64,
    /// Lowest millisecond prefix the current counter epoch may use.
    millis_floor: i64,
    last_millis: i64,
}

impl RequestStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next request id.
    pub fn next_id(&self) -> RequestId {
        self.next_id_at(now_millis())
    }

    /// Issues an id as if the clock read `now_millis`.
    ///
    /// Ids stay unique across [`clear`](Self::clear): the counter restarts
    /// but the millisecond prefix of the new epoch is forced past every
    /// prefix handed out before the clear.
    pub fn next_id_at(&self, now_millis: i64) -> RequestId {
        let mut inner = self.inner.lock();
        let millis = now_millis.max(inner.millis_floor);
        inner.counter += 1;
        inner.last_millis = inner.last_millis.max(millis);
        RequestId::new(format!("req_{}_{}", millis, inner.counter))
    }

    /// Inserts a pending record for `id`. An existing record is returned
    /// unchanged.
    pub fn create(&self, id: RequestId) -> QueuedRequest {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.records.get(&id) {
            return existing.clone();
        }

        let record = QueuedRequest::pending(id.clone(), now_millis());
        inner.order.push(id.clone());
        inner.records.insert(id, record.clone());
        record
    }

    /// Record for `id`, or [`QueueError::NotFound`].
    pub fn get(&self, id: &str) -> Result<QueuedRequest> {
        let inner = self.inner.lock();
        inner
            .records
            .get(&RequestId::from(id))
            .cloned()
            .ok_or_else(|| QueueError::NotFound(id.to_string()))
    }

    /// Applies a status transition. Returns `false` without touching
    /// anything when the id is unknown or the record already completed.
    ///
    /// `result` is only stored alongside `Completed`.
    pub fn update(
        &self,
        id: &RequestId,
        status: RequestStatus,
        result: Option<String>,
    ) -> bool {
        let mut inner = self.inner.lock();
        let Some(record) = inner.records.get_mut(id) else {
            return false;
        };
        if record.is_completed() {
            return false;
        }

        record.status = status;
        record.result = if status.is_terminal() { result } else { None };
        true
    }

    /// Marks `id` completed with `result`. See [`update`](Self::update).
    pub fn complete(&self, id: &RequestId, result: String) -> bool {
        self.update(id, RequestStatus::Completed, Some(result))
    }

    /// Every record in insertion order.
    pub fn list_all(&self) -> Vec<QueuedRequest> {
        let inner = self.inner.lock();
        inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect()
    }

    /// Drops every record and restarts the id counter. Returns how many
    /// records were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let removed = inner.records.len();
        inner.records.clear();
        inner.order.clear();
        inner.counter = 0;
        inner.millis_floor = inner.last_millis + 1;
        removed
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
