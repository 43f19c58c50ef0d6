//! Data model definitions shared by the Roster server and client.
#![allow(missing_docs)]

pub mod directory;
pub mod error;
pub mod events;
pub mod ids;
pub mod worker;

// Intentionally curated re-exports for downstream consumers.
pub use directory::{
    FilterItem, FiltersResponse, HealthResponse, PaginationInfo, User,
    UserQuery, UsersResponse,
};
pub use error::{ModelError, Result as ModelResult};
pub use events::{ChannelEvent, ConnectAck, RequestCompleted, RequestFailed};
pub use ids::RequestId;
pub use worker::{
    ClearResponse, ErrorResponse, QueuedRequest, RequestListResponse,
    RequestStatus, RequestStatusResponse, SubmitResponse,
};

/// Current wall-clock time as Unix epoch milliseconds, the timestamp unit
/// used on every Roster wire type.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
