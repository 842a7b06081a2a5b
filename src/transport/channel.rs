//! Channel-backed transport
//!
//! Fans events out over per-connection unbounded mpsc channels. The server's
//! connection tasks register here to obtain their outbound receiver; the
//! coordinator only ever sees connection ids.
//!
//! Channel pushes never block, so the coordinator may call into this
//! transport while holding its registry lock.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::protocol::{ConnectionId, ServerEvent};

use super::Transport;

#[derive(Default)]
struct Inner {
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
    rooms: HashMap<String, Vec<ConnectionId>>,
}

/// Transport that delivers events over per-connection mpsc channels
#[derive(Default)]
pub struct ChannelTransport {
    inner: Mutex<Inner>,
}

impl ChannelTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return its outbound event receiver
    ///
    /// Called by the connection task before any event is processed for this
    /// connection.
    pub fn register(&self, connection_id: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner
            .lock()
            .unwrap()
            .connections
            .insert(connection_id, tx);
        rx
    }

    /// Remove a connection entirely
    ///
    /// Also scrubs it from any room scope it is still listed in, so a
    /// disconnect that raced the coordinator's `leave` cannot leak an id.
    pub fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.connections.remove(&connection_id);
        inner
            .rooms
            .retain(|_, members| {
                members.retain(|id| *id != connection_id);
                !members.is_empty()
            });
    }

    /// Number of registered connections
    pub fn connection_count(&self) -> usize {
        self.inner.lock().unwrap().connections.len()
    }

    fn deliver(inner: &Inner, connection_id: ConnectionId, event: ServerEvent) {
        if let Some(tx) = inner.connections.get(&connection_id) {
            // Receiver dropped means the connection is tearing down; drop
            // the event, the member will disappear from the room shortly.
            let _ = tx.send(event);
        }
    }
}

impl Transport for ChannelTransport {
    fn send(&self, connection_id: ConnectionId, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        Self::deliver(&inner, connection_id, event);
    }

    fn broadcast(&self, room_id: &str, event: ServerEvent, exclude: Option<ConnectionId>) {
        let inner = self.inner.lock().unwrap();
        let Some(members) = inner.rooms.get(room_id) else {
            return;
        };

        for id in members {
            if Some(*id) == exclude {
                continue;
            }
            Self::deliver(&inner, *id, event.clone());
        }
    }

    fn join(&self, connection_id: ConnectionId, room_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        let members = inner.rooms.entry(room_id.to_string()).or_default();
        if !members.contains(&connection_id) {
            members.push(connection_id);
        }
    }

    fn leave(&self, connection_id: ConnectionId, room_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        let now_empty = match inner.rooms.get_mut(room_id) {
            Some(members) => {
                members.retain(|id| *id != connection_id);
                members.is_empty()
            }
            None => false,
        };
        if now_empty {
            inner.rooms.remove(room_id);
        }
    }
}
