//! Connection hub — registry of live WebSocket connections per user.

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::message::OutboundMessage;

/// Identifier of a single WebSocket connection (a user may hold several).
pub type ConnectionId = Uuid;

/// A registered connection's outbound sender.
#[derive(Debug)]
struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<String>,
}

/// Registry of all live connections, keyed by user.
///
/// Delivery is fire-and-forget: a closed or congested connection is
/// skipped, never surfaced to the caller.
#[derive(Debug, Default)]
pub struct ConnectionHub {
    connections: DashMap<Uuid, Vec<ConnectionHandle>>,
}

impl ConnectionHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for a user.
    ///
    /// Returns the connection ID and the receiver end the socket task
    /// forwards to the wire.
    pub fn register(&self, user_id: Uuid) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        self.connections
            .entry(user_id)
            .or_default()
            .push(ConnectionHandle { id, tx });

        info!(conn_id = %id, user_id = %user_id, "WebSocket connection registered");
        (id, rx)
    }

    /// Unregister a connection.
    pub fn unregister(&self, user_id: Uuid, conn_id: ConnectionId) {
        let mut remove_user = false;
        if let Some(mut handles) = self.connections.get_mut(&user_id) {
            handles.retain(|h| h.id != conn_id);
            remove_user = handles.is_empty();
        }
        if remove_user {
            self.connections.remove(&user_id);
        }
        info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection unregistered");
    }

    /// Whether the user has at least one live connection.
    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.connections
            .get(&user_id)
            .map(|handles| !handles.is_empty())
            .unwrap_or(false)
    }

    /// Push a message to every live connection of a user.
    ///
    /// Returns the number of connections the message was handed to.
    pub fn push_to_user(&self, user_id: Uuid, msg: &OutboundMessage) -> usize {
        let Some(handles) = self.connections.get(&user_id) else {
            return 0;
        };

        let payload = msg.to_json();
        let mut delivered = 0;
        for handle in handles.iter() {
            if handle.tx.send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                debug!(conn_id = %handle.id, "Dropping message for closed connection");
            }
        }
        delivered
    }

    /// Total number of live connections across all users.
    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(|e| e.value().len()).sum()
    }
}
