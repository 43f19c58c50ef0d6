//! # Roster Server
//!
//! HTTP and WebSocket front end for the Roster demo services:
//!
//! - **Worker queue**: submit simulated jobs, poll their status, list and
//!   clear them (`/api/worker/*`)
//! - **Live notifications**: every connected WebSocket subscriber (`/ws`,
//!   `/socket`) receives `request-completed` and `request-error` events
//! - **Mock directory**: paginated, filterable user listing and facet counts
//! - **Text streaming**: lorem text streamed one character at a time
//!
//! State lives in `roster-core`; this crate wires it into an axum router.

pub mod handlers;
pub mod infra;
pub mod routes;
