//! Event types for the signaling protocol
//!
//! Events travel as JSON frames of the form `{"event": "...", "data": {...}}`.
//! Field names follow the wire convention (camelCase), event names are
//! kebab-case.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique identifier for one live client connection
///
/// Assigned by the transport layer at connect time and never reused while
/// the connection is alive. Opaque to clients; they only echo it back as a
/// relay `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A room member as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerInfo {
    /// Connection identifier of the member
    pub connection_id: ConnectionId,
    /// Client-supplied display name (not unique, not validated)
    pub display_name: String,
}

impl PeerInfo {
    /// Create a new peer descriptor
    pub fn new(connection_id: ConnectionId, display_name: impl Into<String>) -> Self {
        Self {
            connection_id,
            display_name: display_name.into(),
        }
    }
}

/// Events received from clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Create a new room, optionally under a caller-supplied identifier
    CreateRoom {
        display_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_room_id: Option<String>,
    },
    /// Join an existing room
    JoinRoom { room_id: String, display_name: String },
    /// Session negotiation offer, relayed verbatim to `target`
    Offer { target: ConnectionId, payload: Value },
    /// Session negotiation answer, relayed verbatim to `target`
    Answer { target: ConnectionId, payload: Value },
    /// Network candidate, relayed verbatim to `target`
    IceCandidate { target: ConnectionId, payload: Value },
    /// Chat message broadcast to the sender's room
    ChatMessage { text: String },
    /// Mute/unmute status broadcast to the sender's room
    MuteStatus { is_muted: bool, display_name: String },
}

impl ClientEvent {
    /// Wire name of the event, for logging
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::CreateRoom { .. } => "create-room",
            ClientEvent::JoinRoom { .. } => "join-room",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::IceCandidate { .. } => "ice-candidate",
            ClientEvent::ChatMessage { .. } => "chat-message",
            ClientEvent::MuteStatus { .. } => "mute-status",
        }
    }
}

/// Events emitted to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Room creation succeeded; sent to the creator only
    RoomCreated { room_id: String, is_creator: bool },
    /// Join succeeded; sent to the joiner only
    RoomJoined { room_id: String, is_creator: bool },
    /// Room action failed; sent to the requester only
    RoomError { error: String },
    /// Members already in the room, excluding the joiner; sent to the joiner
    ExistingUsers(Vec<PeerInfo>),
    /// A new member joined; sent to the other members
    UserJoined(PeerInfo),
    /// A member disconnected; sent to the remaining members
    UserLeft(PeerInfo),
    /// Full member list after a membership change; sent to the whole room
    RoomUsers(Vec<PeerInfo>),
    /// Relayed negotiation offer
    Offer { payload: Value, sender: ConnectionId },
    /// Relayed negotiation answer
    Answer { payload: Value, sender: ConnectionId },
    /// Relayed network candidate
    IceCandidate { payload: Value, sender: ConnectionId },
    /// Chat message; sent to the whole room including the sender
    ChatMessage {
        display_name: String,
        text: String,
        /// Unix timestamp in milliseconds
        timestamp: u64,
    },
    /// Mute status; sent to every member except the sender
    MuteStatus {
        display_name: String,
        connection_id: ConnectionId,
        is_muted: bool,
    },
}

impl ServerEvent {
    /// Wire name of the event, for logging
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::RoomCreated { .. } => "room-created",
            ServerEvent::RoomJoined { .. } => "room-joined",
            ServerEvent::RoomError { .. } => "room-error",
            ServerEvent::ExistingUsers(_) => "existing-users",
            ServerEvent::UserJoined(_) => "user-joined",
            ServerEvent::UserLeft(_) => "user-left",
            ServerEvent::RoomUsers(_) => "room-users",
            ServerEvent::Offer { .. } => "offer",
            ServerEvent::Answer { .. } => "answer",
            ServerEvent::IceCandidate { .. } => "ice-candidate",
            ServerEvent::ChatMessage { .. } => "chat-message",
            ServerEvent::MuteStatus { .. } => "mute-status",
        }
    }
}
