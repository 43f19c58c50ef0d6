//! Event publication seam.

use async_trait::async_trait;
use roster_model::ChannelEvent;

/// Fan-out seam between the queue and whatever transport pushes events to
/// subscribers. Publishing is fire-and-forget: implementations log delivery
/// problems instead of reporting them.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers `event` to every current subscriber.
    async fn publish(&self, event: ChannelEvent);
}

/// Publisher that discards every event. Used when no transport is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(&self, event: ChannelEvent) {
        tracing::trace!(event = event.name(), "dropping event, no subscribers");
    }
}
