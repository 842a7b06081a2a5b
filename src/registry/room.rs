//! Room registry
//!
//! In-memory map of room id to membership. Pure data structure, no I/O and
//! no locking; the coordinator serializes access.
//!
//! Member order is insertion order (join order). A room with zero members is
//! never kept in the registry: every mutation path that can empty a room is
//! expected to delete it inline, so no cleanup pass is needed.

use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;

use crate::protocol::{ConnectionId, PeerInfo};

use super::error::RegistryError;

/// Length of generated room identifiers
const ROOM_ID_LEN: usize = 6;

/// Alphabet for generated room identifiers
const ROOM_ID_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A single room's state
#[derive(Debug, Clone)]
pub struct Room {
    /// Members in join order
    pub members: Vec<PeerInfo>,

    /// Connection that created the room (best-effort, not a privilege)
    pub creator: ConnectionId,

    /// When the room was created (informational)
    pub created_at: Instant,
}

/// Registry of all active rooms
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with the given id and initial member
    ///
    /// Fails if the id is already taken. The creator is registered as the
    /// first member.
    pub fn create(&mut self, room_id: &str, creator: PeerInfo) -> Result<(), RegistryError> {
        if self.rooms.contains_key(room_id) {
            return Err(RegistryError::RoomAlreadyExists(room_id.to_string()));
        }

        let creator_id = creator.connection_id;
        self.rooms.insert(
            room_id.to_string(),
            Room {
                members: vec![creator],
                creator: creator_id,
                created_at: Instant::now(),
            },
        );

        Ok(())
    }

    /// Append a member to an existing room
    pub fn add_member(&mut self, room_id: &str, member: PeerInfo) -> Result<(), RegistryError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))?;

        room.members.push(member);
        Ok(())
    }

    /// Remove a member by connection id
    ///
    /// No-op if the room or member is absent. Does not delete the room when
    /// it becomes empty; the caller decides that (it needs the surviving
    /// member list for notifications first).
    pub fn remove_member(&mut self, room_id: &str, connection_id: ConnectionId) {
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.members.retain(|m| m.connection_id != connection_id);
        }
    }

    /// Members of a room in join order; empty if the room is absent
    pub fn members(&self, room_id: &str) -> Vec<PeerInfo> {
        self.rooms
            .get(room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    /// Whether a room exists
    pub fn exists(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Delete a room unconditionally
    pub fn delete(&mut self, room_id: &str) {
        self.rooms.remove(room_id);
    }

    /// Whether a room is absent or has zero members
    pub fn is_empty(&self, room_id: &str) -> bool {
        self.rooms
            .get(room_id)
            .map(|room| room.members.is_empty())
            .unwrap_or(true)
    }

    /// Number of active rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of members in a room; zero if absent
    pub fn member_count(&self, room_id: &str) -> usize {
        self.rooms
            .get(room_id)
            .map(|room| room.members.len())
            .unwrap_or(0)
    }

    /// Look up a room
    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Ids of all active rooms, in no particular order
    pub fn room_ids(&self) -> Vec<String> {
        self.rooms.keys().cloned().collect()
    }

    /// Generate a short room identifier
    ///
    /// Six uppercase alphanumeric characters. Does not check the registry
    /// for collisions; the caller retries `create` on `RoomAlreadyExists`.
    pub fn generate_id() -> String {
        let mut rng = rand::thread_rng();
        (0..ROOM_ID_LEN)
            .map(|_| ROOM_ID_CHARSET[rng.gen_range(0..ROOM_ID_CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(id: u64, name: &str) -> PeerInfo {
        PeerInfo::new(ConnectionId(id), name)
    }

    #[test]
    fn test_create_room() {
        let mut registry = RoomRegistry::new();

        registry.create("ABCD", peer(1, "Alice")).unwrap();

        assert!(registry.exists("ABCD"));
        assert_eq!(registry.member_count("ABCD"), 1);
        assert_eq!(registry.get("ABCD").unwrap().creator, ConnectionId(1));
    }

    #[test]
    fn test_create_duplicate_room_fails() {
        let mut registry = RoomRegistry::new();
        registry.create("ABCD", peer(1, "Alice")).unwrap();

        let result = registry.create("ABCD", peer(2, "Bob"));
        assert_eq!(
            result,
            Err(RegistryError::RoomAlreadyExists("ABCD".to_string()))
        );

        // Existing room untouched
        let members = registry.members("ABCD");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].display_name, "Alice");
    }

    #[test]
    fn test_add_member_to_missing_room_fails() {
        let mut registry = RoomRegistry::new();

        let result = registry.add_member("NOPE", peer(1, "Alice"));
        assert_eq!(result, Err(RegistryError::RoomNotFound("NOPE".to_string())));
    }

    #[test]
    fn test_members_in_join_order() {
        let mut registry = RoomRegistry::new();
        registry.create("ABCD", peer(1, "Alice")).unwrap();
        registry.add_member("ABCD", peer(2, "Bob")).unwrap();
        registry.add_member("ABCD", peer(3, "Carol")).unwrap();

        let names: Vec<_> = registry
            .members("ABCD")
            .into_iter()
            .map(|m| m.display_name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_remove_member() {
        let mut registry = RoomRegistry::new();
        registry.create("ABCD", peer(1, "Alice")).unwrap();
        registry.add_member("ABCD", peer(2, "Bob")).unwrap();

        registry.remove_member("ABCD", ConnectionId(1));

        let members = registry.members("ABCD");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].connection_id, ConnectionId(2));

        // Removing an absent member or from an absent room is a no-op
        registry.remove_member("ABCD", ConnectionId(99));
        registry.remove_member("NOPE", ConnectionId(1));
        assert_eq!(registry.member_count("ABCD"), 1);
    }

    #[test]
    fn test_is_empty() {
        let mut registry = RoomRegistry::new();
        assert!(registry.is_empty("ABCD"));

        registry.create("ABCD", peer(1, "Alice")).unwrap();
        assert!(!registry.is_empty("ABCD"));

        registry.remove_member("ABCD", ConnectionId(1));
        assert!(registry.is_empty("ABCD"));
    }

    #[test]
    fn test_delete_and_recreate() {
        let mut registry = RoomRegistry::new();
        registry.create("ABCD", peer(1, "Alice")).unwrap();

        registry.delete("ABCD");
        assert!(!registry.exists("ABCD"));

        // Same id may be reused after deletion
        registry.create("ABCD", peer(2, "Bob")).unwrap();
        assert_eq!(registry.get("ABCD").unwrap().creator, ConnectionId(2));
    }

    #[test]
    fn test_members_of_missing_room_is_empty() {
        let registry = RoomRegistry::new();
        assert!(registry.members("NOPE").is_empty());
        assert_eq!(registry.member_count("NOPE"), 0);
    }

    #[test]
    fn test_generate_id_shape() {
        for _ in 0..100 {
            let id = RoomRegistry::generate_id();
            assert_eq!(id.len(), 6);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
