use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{RequestId, error::ModelError};

/// Lifecycle state of a queued worker request.
///
/// `Processing` is part of the wire contract but the queue never enters it:
/// records go straight from `Pending` to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(RequestStatus::Pending),
            "processing" => Ok(RequestStatus::Processing),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single worker request as held by the queue and listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedRequest {
    pub id: RequestId,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Submission time, Unix epoch milliseconds.
    pub timestamp: i64,
}

impl QueuedRequest {
    pub fn pending(id: RequestId, timestamp: i64) -> Self {
        Self {
            id,
            status: RequestStatus::Pending,
            result: None,
            timestamp,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Body of `POST /api/worker/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub request_id: RequestId,
    pub status: RequestStatus,
    pub message: String,
    pub timestamp: i64,
}

/// Body of `GET /api/worker/status/{requestId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusResponse {
    pub request_id: RequestId,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub timestamp: i64,
}

impl From<QueuedRequest> for RequestStatusResponse {
    fn from(request: QueuedRequest) -> Self {
        Self {
            request_id: request.id,
            status: request.status,
            result: request.result,
            timestamp: request.timestamp,
        }
    }
}

/// Body of `GET /api/worker/requests`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestListResponse {
    pub requests: Vec<QueuedRequest>,
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl RequestListResponse {
    /// Builds the listing, counting statuses over the full set.
    pub fn from_requests(requests: Vec<QueuedRequest>) -> Self {
        let pending = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .count();
        let completed = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Completed)
            .count();
        Self {
            total: requests.len(),
            requests,
            pending,
            completed,
        }
    }
}

/// Body of `DELETE /api/worker/clear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
    pub timestamp: i64,
}

/// Error body returned by every Roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: i64,
}
