//! Server-wide statistics
//!
//! Cheap atomic counters updated by the listener and the coordinator,
//! readable at any time via [`SignalingStats::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for a signaling server
#[derive(Debug, Default)]
pub struct SignalingStats {
    total_connections: AtomicU64,
    active_connections: AtomicU64,
    active_rooms: AtomicU64,
    events_relayed: AtomicU64,
    chat_messages: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Connections accepted since start
    pub total_connections: u64,
    /// Currently open connections
    pub active_connections: u64,
    /// Rooms currently in the registry
    pub active_rooms: u64,
    /// Offer/answer/ice-candidate events forwarded
    pub events_relayed: u64,
    /// Chat messages broadcast
    pub chat_messages: u64,
}

impl SignalingStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.total_connections.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn room_opened(&self) {
        self.active_rooms.fetch_add(1, Ordering::Relaxed);
    }

    pub fn room_closed(&self) {
        self.active_rooms.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn event_relayed(&self) {
        self.events_relayed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chat_message(&self) {
        self.chat_messages.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters at once
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_connections: self.total_connections.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            active_rooms: self.active_rooms.load(Ordering::Relaxed),
            events_relayed: self.events_relayed.load(Ordering::Relaxed),
            chat_messages: self.chat_messages.load(Ordering::Relaxed),
        }
    }
}
