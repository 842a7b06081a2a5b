//! Registry error types
//!
//! Client-facing errors for room registry operations. These are the only
//! errors surfaced to clients (as `room-error`); everything else in the
//! coordinator is a silent no-op.

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Room not found
    RoomNotFound(String),
    /// Room already exists
    RoomAlreadyExists(String),
}

impl RegistryError {
    /// Message sent to clients in the `room-error` event
    ///
    /// Deliberately omits the room id; clients already know which room they
    /// asked for.
    pub fn client_message(&self) -> &'static str {
        match self {
            RegistryError::RoomNotFound(_) => "Room does not exist",
            RegistryError::RoomAlreadyExists(_) => "Room already exists",
        }
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::RoomNotFound(id) => write!(f, "Room not found: {}", id),
            RegistryError::RoomAlreadyExists(id) => write!(f, "Room already exists: {}", id),
        }
    }
}

impl std::error::Error for RegistryError {}
