//! Worker request queue: record store, processors and the coordinator that
//! ties them to an event publisher.

pub mod coordinator;
pub mod processor;
pub mod publisher;
pub mod store;

pub use coordinator::QueueCoordinator;
pub use processor::{
    DEFAULT_PROCESSING_DELAY, RequestProcessor, SimulatedProcessor,
};
pub use publisher::{EventPublisher, NoopPublisher};
pub use store::RequestStore;
