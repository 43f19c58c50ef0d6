//! Roster client library
//!
//! HTTP and WebSocket client for a Roster server, used by the `roster`
//! binary in `src/main.rs` and by the end-to-end tests.
//!
//! - [`api_client`]: worker queue and directory endpoints over `reqwest`
//! - [`subscription`]: notification channel subscription
//! - [`tracker`] and [`session`]: the local request list kept in sync with
//!   channel events
//! - [`text_stream`]: the character streaming endpoint
#![allow(missing_docs)]

pub mod api_client;
pub mod session;
pub mod subscription;
pub mod text_stream;
pub mod tracker;

pub use api_client::{ApiClient, DEFAULT_BASE_URL, DirectoryApi, WorkerApi};
pub use session::WorkerRequestsSession;
pub use subscription::{ConnectionStatus, EventSubscription};
pub use text_stream::TextStreamClient;
pub use tracker::{RequestTracker, TrackerCounts};
