//! Core library for the Roster demo services.
//!
//! The crate owns every piece of state the server exposes:
//!
//! - [`worker`]: the in-memory request store, the simulated processor and
//!   the queue coordinator that ties them to a notification publisher.
//! - [`directory`]: the mock user directory with filtering, pagination and
//!   facet counts.
//! - [`streaming`]: the character-by-character text stream.
//! - [`lorem`]: placeholder text generation used by the processor and the
//!   stream.
//!
//! HTTP and WebSocket concerns live in `roster-server`; this crate only
//! defines the [`worker::EventPublisher`] seam the server plugs into.

pub mod api;
pub mod directory;
pub mod error;
pub mod lorem;
pub mod streaming;
pub mod worker;

pub use error::{QueueError, Result};
pub use roster_model as model;
