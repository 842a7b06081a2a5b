//! Call-history hook
//!
//! The coordinator invokes a [`HistoryRecorder`] at room lifecycle
//! boundaries (created, peer joined, peer left). Recording is strictly
//! best-effort: the coordinator calls it after releasing its registry lock,
//! logs failures at warn level, and never surfaces them to clients.
//!
//! Durable storage lives outside this crate. Implementations that perform
//! real I/O should hand the event off to their own task (for example over a
//! channel) rather than block the caller.

use std::time::SystemTime;

/// Result type for history recording
pub type HistoryResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// What happened at a room boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    /// A room was created
    RoomCreated,
    /// A peer joined an existing room
    PeerJoined,
    /// A peer disconnected from its room
    PeerLeft,
}

/// One history record
#[derive(Debug, Clone)]
pub struct HistoryEvent {
    /// What happened
    pub kind: HistoryKind,
    /// Room involved
    pub room_id: String,
    /// Display name of the peer involved
    pub display_name: String,
    /// When it happened
    pub timestamp: SystemTime,
}

impl HistoryEvent {
    /// Create a record stamped with the current time
    pub fn now(kind: HistoryKind, room_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            kind,
            room_id: room_id.into(),
            display_name: display_name.into(),
            timestamp: SystemTime::now(),
        }
    }
}

/// Sink for call-history records
pub trait HistoryRecorder: Send + Sync + 'static {
    /// Record one event
    ///
    /// Must not block; hand off to a background task for real persistence.
    fn record(&self, event: HistoryEvent) -> HistoryResult;
}

/// Recorder that discards everything; the default
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl HistoryRecorder for NullRecorder {
    fn record(&self, _event: HistoryEvent) -> HistoryResult {
        Ok(())
    }
}
