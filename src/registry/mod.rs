//! In-memory registries for rooms and connections
//!
//! Two owned maps with no interior locking: the [`RoomRegistry`] (room id to
//! membership) and the [`ConnectionRegistry`] (connection id to display name
//! and current room). The signaling coordinator owns both behind a single
//! mutex and keeps them bidirectionally consistent: every member listed in a
//! room has a connection entry pointing back at that room, after every
//! mutation.
//!
//! Rooms are self-cleaning: the instant a mutation empties a room, the
//! caller deletes it, so the registry never needs a reaper pass.

pub mod connection;
pub mod error;
pub mod room;

pub use connection::{ConnectionEntry, ConnectionRegistry};
pub use error::RegistryError;
pub use room::{Room, RoomRegistry};
