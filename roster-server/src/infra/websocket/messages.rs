use anyhow::Result;
use axum::extract::ws::{Message, Utf8Bytes};
use roster_model::{ChannelEvent, ConnectAck};
use uuid::Uuid;

/// Convert a ChannelEvent to a WebSocket text frame
pub fn event_to_websocket(event: &ChannelEvent) -> Result<Message> {
    let json = event.to_frame()?;
    Ok(Message::Text(Utf8Bytes::from(json)))
}

/// Handshake sent to a freshly accepted subscriber
pub fn connect_ack(conn_id: Uuid) -> ChannelEvent {
    ChannelEvent::Connected(ConnectAck {
        connection_id: conn_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_ack_is_a_text_frame_with_the_connection_id() {
        let id = Uuid::now_v7();
        let message = event_to_websocket(&connect_ack(id)).unwrap();

        let Message::Text(text) = message else {
            panic!("expected text frame");
        };
        let frame: serde_json::Value =
            serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(frame["event"], "connect");
        assert_eq!(frame["data"]["connectionId"], id.to_string());
    }
}
