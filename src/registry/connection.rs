//! Connection registry
//!
//! Maps live connection ids to their display name and current room. Entries
//! exist only while a connection is in a room: created on the first room
//! action, removed on disconnect.

use std::collections::HashMap;

use crate::protocol::ConnectionId;

/// Per-connection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEntry {
    /// Client-supplied display name
    pub display_name: String,
    /// Room this connection currently belongs to
    pub room_id: String,
}

/// Registry of live connections that have joined a room
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a connection
    pub fn put(
        &mut self,
        connection_id: ConnectionId,
        display_name: impl Into<String>,
        room_id: impl Into<String>,
    ) {
        self.connections.insert(
            connection_id,
            ConnectionEntry {
                display_name: display_name.into(),
                room_id: room_id.into(),
            },
        );
    }

    /// Look up a connection
    pub fn get(&self, connection_id: ConnectionId) -> Option<&ConnectionEntry> {
        self.connections.get(&connection_id)
    }

    /// Remove a connection, returning its entry if present
    pub fn remove(&mut self, connection_id: ConnectionId) -> Option<ConnectionEntry> {
        self.connections.remove(&connection_id)
    }

    /// All connections currently in the given room
    ///
    /// Used by peripheral features (history, stats); the relay hot path goes
    /// through the room registry's member list instead.
    pub fn list_by_room(&self, room_id: &str) -> Vec<(ConnectionId, ConnectionEntry)> {
        self.connections
            .iter()
            .filter(|(_, entry)| entry.room_id == room_id)
            .map(|(id, entry)| (*id, entry.clone()))
            .collect()
    }

    /// Iterate over all entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (ConnectionId, &ConnectionEntry)> + '_ {
        self.connections.iter().map(|(id, entry)| (*id, entry))
    }

    /// Number of registered connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
