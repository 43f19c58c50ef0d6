use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use roster_model::ChannelEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::infra::{
    app_state::AppState,
    websocket::{Connection, messages},
};

/// Handle WebSocket upgrade request
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) =
        mpsc::channel::<ChannelEvent>(state.config().websocket.outbound_buffer);

    let connection = Arc::new(Connection::new(tx));
    let conn_id = connection.id;

    // Handshake goes out before the connection can see broadcasts
    if let Err(e) = connection.send_event(messages::connect_ack(conn_id)).await
    {
        tracing::error!(connection_id = %conn_id, "Failed to queue handshake: {}", e);
        return;
    }
    state.websocket_manager.add_connection(connection);
    tracing::info!(
        connection_id = %conn_id,
        subscribers = state.websocket_manager.connection_count(),
        "Client connected"
    );

    // Spawn task to handle outgoing messages
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match messages::event_to_websocket(&event) {
                Ok(ws_msg) => {
                    if ws_sender.send(ws_msg).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(event = event.name(), "Failed to encode event: {}", e);
                }
            }
        }
    });

    // Subscribers have nothing to say; drain until close
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(connection_id = %conn_id, "WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.websocket_manager.remove_connection(conn_id);
    tracing::info!(connection_id = %conn_id, "Client disconnected");
}
