use game_types::{PlayerId, ServerEvent};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// One id per websocket; it doubles as the player id once the
/// connection joins the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn player_id(&self) -> PlayerId {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PlayerId> for ConnectionId {
    fn from(id: PlayerId) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: mpsc::UnboundedSender<ServerEvent>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { id, sender }, receiver)
    }

    pub fn send(&self, event: ServerEvent) -> Result<(), String> {
        self.sender.send(event).map_err(|_| "Connection closed".to_string())
    }
}

/// The single game room: per-connection outgoing channels plus a
/// broadcast-to-all primitive. Delivery is fire-and-forget; a closed
/// peer is skipped, never an error for the game.
pub struct RoomHub {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (connection, receiver) = Connection::new(id);
        let mut connections = self.connections.write().await;
        connections.insert(id, connection);
        receiver
    }

    pub async fn unregister(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&id);
    }

    pub async fn send_to(&self, id: ConnectionId, event: ServerEvent) -> Result<(), String> {
        let connections = self.connections.read().await;
        match connections.get(&id) {
            Some(connection) => connection.send(event),
            None => Err("Connection not found".to_string()),
        }
    }

    pub async fn broadcast(&self, event: ServerEvent) {
        let connections = self.connections.read().await;
        for connection in connections.values() {
            let _ = connection.send(event.clone());
        }
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_and_unregister_track_the_room() {
        let hub = RoomHub::new();
        let id = ConnectionId::new();

        let _receiver = hub.register(id).await;
        assert_eq!(hub.connection_count().await, 1);

        hub.unregister(id).await;
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let hub = RoomHub::new();
        let mut receiver1 = hub.register(ConnectionId::new()).await;
        let mut receiver2 = hub.register(ConnectionId::new()).await;

        hub.broadcast(ServerEvent::GameWaiting).await;

        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn unicast_reaches_only_the_target() {
        let hub = RoomHub::new();
        let target = ConnectionId::new();
        let mut target_rx = hub.register(target).await;
        let mut other_rx = hub.register(ConnectionId::new()).await;

        hub.send_to(target, ServerEvent::InvalidUsername).await.unwrap();

        assert!(target_rx.try_recv().is_ok());
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn sending_to_unknown_connection_fails() {
        let hub = RoomHub::new();
        let result = hub.send_to(ConnectionId::new(), ServerEvent::GameWaiting).await;
        assert_eq!(result.unwrap_err(), "Connection not found");
    }

    #[tokio::test]
    async fn sending_after_receiver_drop_fails() {
        let hub = RoomHub::new();
        let id = ConnectionId::new();
        let receiver = hub.register(id).await;
        drop(receiver);

        let result = hub.send_to(id, ServerEvent::GameWaiting).await;
        assert_eq!(result.unwrap_err(), "Connection closed");
    }
}
