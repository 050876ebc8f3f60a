use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use game_types::ClientEvent;

pub mod connection;

pub use connection::{ConnectionId, RoomHub};

use crate::engine::Command;

pub async fn handle_connection(
    websocket: WebSocket,
    hub: Arc<RoomHub>,
    engine_tx: UnboundedSender<Command>,
) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();

    // Register with the hub and get the receiver for outgoing events
    let mut event_receiver = hub.register(connection_id).await;

    // Inbound: decode client events and queue them for the engine
    let incoming_handler = {
        let engine_tx = engine_tx.clone();
        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if let Err(e) = handle_message(msg, connection_id, &engine_tx) {
                            error!("Error handling message for {}: {}", connection_id, e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    };

    // Outbound: serialize engine pushes onto the socket
    let outgoing_handler = async move {
        while let Some(event) = event_receiver.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize event: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::text(json)).await {
                warn!("Failed to send event to {}: {:?}", connection_id, e);
                break;
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!("Connection {} disconnected", connection_id);
    hub.unregister(connection_id).await;
    let _ = engine_tx.send(Command::Disconnect {
        conn: connection_id,
    });
}

fn handle_message(
    msg: Message,
    connection_id: ConnectionId,
    engine_tx: &UnboundedSender<Command>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Only handle text frames
    if !msg.is_text() {
        return Ok(());
    }

    let text = msg.to_str().map_err(|_| "Invalid text message")?;
    let event: ClientEvent =
        serde_json::from_str(text).map_err(|e| format!("Invalid JSON message: {}", e))?;

    engine_tx
        .send(command_for(connection_id, event))
        .map_err(|_| "Engine queue closed")?;
    Ok(())
}

fn command_for(conn: ConnectionId, event: ClientEvent) -> Command {
    match event {
        ClientEvent::Join {
            username,
            joined_at,
        } => Command::Join {
            conn,
            username,
            joined_at,
        },
        ClientEvent::NewMessage { text } => Command::Chat { conn, text },
        ClientEvent::NewLine { line } => Command::Line { conn, line },
        ClientEvent::NewWord { word } => Command::Word { conn, word },
        ClientEvent::GetWordChoices => Command::WordChoices { conn },
    }
}
