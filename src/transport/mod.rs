//! Transport seam between the coordinator and client connections
//!
//! The coordinator never touches sockets. It addresses clients purely by
//! connection id through the [`Transport`] trait: point-to-point `send`,
//! room-scoped `broadcast` with an optional exclusion, and `join`/`leave` to
//! keep the transport's room scoping in step with the registries.
//!
//! All operations are fire-and-forget. Sending to a connection that is gone
//! (or broadcasting to a room where members are concurrently disconnecting)
//! is a harmless no-op, never an error; disconnect races are expected.

pub mod channel;

pub use channel::ChannelTransport;

use crate::protocol::{ConnectionId, ServerEvent};

/// Outbound event delivery, addressed by connection id
pub trait Transport: Send + Sync + 'static {
    /// Send an event to one connection
    fn send(&self, connection_id: ConnectionId, event: ServerEvent);

    /// Send an event to every member of a room, optionally excluding one
    fn broadcast(&self, room_id: &str, event: ServerEvent, exclude: Option<ConnectionId>);

    /// Add a connection to a room's broadcast scope
    fn join(&self, connection_id: ConnectionId, room_id: &str);

    /// Remove a connection from a room's broadcast scope
    fn leave(&self, connection_id: ConnectionId, room_id: &str);
}

/// Fake transport that records every delivered event, for coordinator tests
#[cfg(test)]
pub struct RecordingTransport {
    inner: std::sync::Mutex<RecordingInner>,
}

#[cfg(test)]
#[derive(Default)]
struct RecordingInner {
    rooms: std::collections::HashMap<String, Vec<ConnectionId>>,
    delivered: Vec<(ConnectionId, ServerEvent)>,
}

#[cfg(test)]
impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(RecordingInner::default()),
        }
    }

    /// Events delivered to one connection, in order
    pub fn sent_to(&self, connection_id: ConnectionId) -> Vec<ServerEvent> {
        self.inner
            .lock()
            .unwrap()
            .delivered
            .iter()
            .filter(|(id, _)| *id == connection_id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// All delivered (target, event) pairs, in order
    pub fn all(&self) -> Vec<(ConnectionId, ServerEvent)> {
        self.inner.lock().unwrap().delivered.clone()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().delivered.clear();
    }
}

#[cfg(test)]
impl Transport for RecordingTransport {
    fn send(&self, connection_id: ConnectionId, event: ServerEvent) {
        self.inner
            .lock()
            .unwrap()
            .delivered
            .push((connection_id, event));
    }

    fn broadcast(&self, room_id: &str, event: ServerEvent, exclude: Option<ConnectionId>) {
        let mut inner = self.inner.lock().unwrap();
        let targets: Vec<ConnectionId> = inner
            .rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|id| Some(*id) != exclude)
                    .collect()
            })
            .unwrap_or_default();

        for target in targets {
            inner.delivered.push((target, event.clone()));
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
