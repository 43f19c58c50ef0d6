use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use futures_util::StreamExt;
use parking_lot::Mutex;
use roster_core::api::routes::api;
use roster_model::ChannelEvent;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

const EVENT_BUFFER: usize = 256;

/// Shared view of a subscription's transport state.
#[derive(Clone, Debug, Default)]
pub struct ConnectionStatus {
    connected: Arc<AtomicBool>,
    connection_id: Arc<Mutex<Option<String>>>,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Id the server assigned in its `connect` frame.
    pub fn connection_id(&self) -> Option<String> {
        self.connection_id.lock().clone()
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

/// One WebSocket subscription to the notification channel.
///
/// Parsed events are queued for [`recv`](Self::recv). There is no
/// reconnection: once the socket drops, `recv` drains what was queued and
/// then returns `None`. Dropping the subscription closes the socket.
#[derive(Debug)]
pub struct EventSubscription {
    events: mpsc::Receiver<ChannelEvent>,
    status: ConnectionStatus,
    reader: JoinHandle<()>,
}

/// Notification channel URL for an HTTP base URL.
pub fn channel_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .with_context(|| format!("invalid server URL '{base_url}'"))?;
    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme).map_err(|_| {
        anyhow::anyhow!("cannot derive WebSocket URL from '{base_url}'")
    })?;
    url.set_path(api::channel::WS);
    Ok(url)
}

impl EventSubscription {
    /// Connects to the channel of the server at `base_url`.
    pub async fn connect(base_url: &str) -> Result<Self> {
        let url = channel_url(base_url)?;
        let (socket, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("failed to connect to {url}"))?;
        log::info!("[Subscription] connected to {}", url);

        let status = ConnectionStatus::default();
        status.set_connected(true);
        let (tx, events) = mpsc::channel(EVENT_BUFFER);

        let reader_status = status.clone();
        let reader = tokio::spawn(async move {
            let (_write, mut read) = socket.split();
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        match ChannelEvent::from_frame(text.as_str()) {
                            Ok(event) => {
                                if let ChannelEvent::Connected(ack) = &event {
                                    log::debug!(
                                        "[Subscription] connection id {}",
                                        ack.connection_id
                                    );
                                    *reader_status.connection_id.lock() =
                                        Some(ack.connection_id.clone());
                                }
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                log::warn!("[Subscription] ignoring frame: {}", e);
                            }
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("[Subscription] transport error: {}", e);
                        break;
                    }
                }
            }
            reader_status.set_connected(false);
            log::info!("[Subscription] disconnected");
        });

        Ok(Self {
            events,
            status,
            reader,
        })
    }

    /// Next event, or `None` once the socket is gone and the queue drained.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        self.events.recv().await
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    /// Closes the socket. Server-side work is unaffected.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.reader.abort();
        self.status.set_connected(false);
    }
}
