//! HTTP and WebSocket route table.

/// Route path constants.
pub mod routes;

pub use routes::api;
