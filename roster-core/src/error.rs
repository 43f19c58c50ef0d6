//! Queue error types.

use thiserror::Error;

/// Failures surfaced by the request queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// No record with this id.
    #[error("Request not found: {0}")]
    NotFound(String),

    /// A processor run failed.
    #[error("Processing failed: {0}")]
    Processing(String),
}

/// Result type used across the queue.
pub type Result<T> = std::result::Result<T, QueueError>;
