use anyhow::Result;
use roster_model::{ChannelEvent, now_millis};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Connection {
    /// Unique connection ID, also sent to the client in the `connect` frame
    pub id: Uuid,
    /// When the socket was accepted, epoch milliseconds
    pub connected_at: i64,
    /// Channel feeding this connection's writer task
    sender: mpsc::Sender<ChannelEvent>,
}

impl Connection {
    pub fn new(sender: mpsc::Sender<ChannelEvent>) -> Self {
        Self {
            id: Uuid::now_v7(),
            connected_at: now_millis(),
            sender,
        }
    }

    /// Queue an event for this connection
    pub async fn send_event(&self, event: ChannelEvent) -> Result<()> {
        self.sender
            .send(event)
            .await
            .map_err(|_| anyhow::anyhow!("Failed to send event: channel closed"))
    }

    /// Queue an event only if the outbound buffer has room
    pub fn try_send_event(
        &self,
        event: ChannelEvent,
    ) -> Result<(), TrySendError<ChannelEvent>> {
        self.sender.try_send(event)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
