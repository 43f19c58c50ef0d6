use crate::infra::websocket::connection::Connection;
use async_trait::async_trait;
use dashmap::DashMap;
use roster_core::worker::EventPublisher;
use roster_model::ChannelEvent;
use std::{fmt, sync::Arc};
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

/// Registry of live subscribers. Every event goes to every connection.
#[derive(Clone, Default)]
pub struct ConnectionManager {
    /// Active WebSocket connections mapped by connection ID
    connections: Arc<DashMap<Uuid, Arc<Connection>>>,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connection_count", &self.connections.len())
            .finish()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection
    pub fn add_connection(&self, connection: Arc<Connection>) {
        self.connections.insert(connection.id, connection);
    }

    pub fn remove_connection(&self, conn_id: Uuid) -> Option<Arc<Connection>> {
        self.connections.remove(&conn_id).map(|(_, conn)| conn)
    }

    pub fn get_connection(&self, conn_id: &Uuid) -> Option<Arc<Connection>> {
        self.connections.get(conn_id).map(|c| c.clone())
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Send an event to every connected subscriber.
    ///
    /// Never waits on a subscriber: a full outbound buffer drops the event
    /// for that connection only, and closed connections are deregistered.
    pub fn broadcast(&self, event: ChannelEvent) {
        // Snapshot first; map guards must not be held while sending
        let connections: Vec<Arc<Connection>> = self
            .connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        tracing::debug!(
            event = event.name(),
            subscribers = connections.len(),
            "broadcasting event"
        );

        for conn in connections {
            match conn.try_send_event(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        connection_id = %conn.id,
                        event = event.name(),
                        "Outbound buffer full; dropping event"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(
                        connection_id = %conn.id,
                        "Connection closed; removing subscriber"
                    );
                    self.remove_connection(conn.id);
                }
            }
        }
    }
}

#[async_trait]
impl EventPublisher for ConnectionManager {
    async fn publish(&self, event: ChannelEvent) {
        self.broadcast(event);
    }
}
