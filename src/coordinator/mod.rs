//! Signaling coordinator
//!
//! Owns the room and connection registries and drives the whole protocol:
//! it consumes inbound client events, mutates the registries, and emits
//! outbound events through the [`Transport`] seam.
//!
//! # Concurrency
//!
//! Both registries live behind one `tokio::sync::Mutex`. Every inbound
//! event's read-mutate-broadcast sequence runs entirely under that lock, so
//! two near-simultaneous joins to the same room can never both observe the
//! pre-join member list. Transport sends are non-blocking channel pushes and
//! are safe under the lock; history recording happens strictly after the
//! lock is released.
//!
//! There are no fatal errors here. Client mistakes come back as `room-error`
//! to the requester only; races (relay to a dead target, chat with no room,
//! duplicate disconnect) are silent no-ops.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use crate::history::{HistoryEvent, HistoryKind, HistoryRecorder, NullRecorder};
use crate::protocol::{ClientEvent, ConnectionId, PeerInfo, ServerEvent};
use crate::registry::{ConnectionRegistry, RoomRegistry};
use crate::stats::SignalingStats;
use crate::transport::Transport;

/// How many generated ids to try before giving up on `create-room`
///
/// Generated ids are not checked against the registry up front; a collision
/// simply fails `create` and we roll again.
const MAX_ID_ATTEMPTS: usize = 5;

/// Registries guarded by the coordinator lock
#[derive(Default)]
struct State {
    rooms: RoomRegistry,
    connections: ConnectionRegistry,
}

/// The signaling control logic
///
/// One instance serves every connection. Cheap to share via `Arc`.
pub struct SignalingCoordinator<T: Transport> {
    state: Mutex<State>,
    transport: Arc<T>,
    history: Arc<dyn HistoryRecorder>,
    stats: Arc<SignalingStats>,
}

impl<T: Transport> SignalingCoordinator<T> {
    /// Create a coordinator with no history recording
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            transport,
            history: Arc::new(NullRecorder),
            stats: Arc::new(SignalingStats::new()),
        }
    }

    /// Attach a call-history recorder
    pub fn with_history(mut self, history: Arc<dyn HistoryRecorder>) -> Self {
        self.history = history;
        self
    }

    /// Share a stats instance (e.g. with the server that owns this coordinator)
    pub fn with_stats(mut self, stats: Arc<SignalingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Process one inbound event from a connection
    pub async fn handle_event(&self, connection_id: ConnectionId, event: ClientEvent) {
        tracing::trace!(connection_id = %connection_id, event = event.name(), "Inbound event");

        match event {
            ClientEvent::CreateRoom {
                display_name,
                custom_room_id,
            } => {
                self.create_room(connection_id, display_name, custom_room_id)
                    .await;
            }
            ClientEvent::JoinRoom {
                room_id,
                display_name,
            } => {
                self.join_room(connection_id, room_id, display_name).await;
            }
            ClientEvent::Offer { target, payload } => {
                self.relay(target, ServerEvent::Offer {
                    payload,
                    sender: connection_id,
                });
            }
            ClientEvent::Answer { target, payload } => {
                self.relay(target, ServerEvent::Answer {
                    payload,
                    sender: connection_id,
                });
            }
            ClientEvent::IceCandidate { target, payload } => {
                self.relay(target, ServerEvent::IceCandidate {
                    payload,
                    sender: connection_id,
                });
            }
            ClientEvent::ChatMessage { text } => {
                self.chat_message(connection_id, text).await;
            }
            ClientEvent::MuteStatus {
                is_muted,
                display_name,
            } => {
                self.mute_status(connection_id, is_muted, display_name)
                    .await;
            }
        }
    }

    /// Handle a transport-level disconnect
    ///
    /// Idempotent: a second invocation for the same connection finds no
    /// registry entry and does nothing.
    pub async fn handle_disconnect(&self, connection_id: ConnectionId) {
        let history_event = {
            let mut state = self.state.lock().await;

            let Some(entry) = state.connections.remove(connection_id) else {
                tracing::trace!(
                    connection_id = %connection_id,
                    "Disconnect for unregistered connection"
                );
                return;
            };

            let room_id = entry.room_id;
            state.rooms.remove_member(&room_id, connection_id);
            self.transport.leave(connection_id, &room_id);

            if state.rooms.is_empty(&room_id) {
                // No grace window: the room dies with its last member, even
                // if that member reconnects a second later.
                state.rooms.delete(&room_id);
                self.stats.room_closed();
                tracing::info!(room = %room_id, "Room deleted, last member left");
            } else {
                let left = PeerInfo::new(connection_id, entry.display_name.clone());
                self.transport
                    .broadcast(&room_id, ServerEvent::UserLeft(left), None);
                self.transport.broadcast(
                    &room_id,
                    ServerEvent::RoomUsers(state.rooms.members(&room_id)),
                    None,
                );
            }

            tracing::info!(
                connection_id = %connection_id,
                room = %room_id,
                display_name = %entry.display_name,
                "Peer disconnected"
            );

            HistoryEvent::now(HistoryKind::PeerLeft, room_id, entry.display_name)
        };

        self.record_history(history_event);
    }

    async fn create_room(
        &self,
        connection_id: ConnectionId,
        display_name: String,
        custom_room_id: Option<String>,
    ) {
        // An empty or all-whitespace custom id means "no preference": fall
        // through to the generated-id path instead of naming a room "".
        let custom_room_id = custom_room_id.filter(|id| !id.trim().is_empty());

        let history_event = {
            let mut state = self.state.lock().await;

            // A connection belongs to at most one room; a second room action
            // from the same connection is ignored.
            if state.connections.get(connection_id).is_some() {
                tracing::debug!(
                    connection_id = %connection_id,
                    "create-room from connection already in a room ignored"
                );
                return;
            }

            let creator = PeerInfo::new(connection_id, display_name.clone());

            let room_id = match custom_room_id {
                Some(id) => {
                    if let Err(e) = state.rooms.create(&id, creator) {
                        tracing::debug!(
                            connection_id = %connection_id,
                            room = %id,
                            "Room creation rejected"
                        );
                        self.transport.send(connection_id, ServerEvent::RoomError {
                            error: e.client_message().to_string(),
                        });
                        return;
                    }
                    id
                }
                None => {
                    let mut created = None;
                    for _ in 0..MAX_ID_ATTEMPTS {
                        let id = RoomRegistry::generate_id();
                        if state.rooms.create(&id, creator.clone()).is_ok() {
                            created = Some(id);
                            break;
                        }
                        tracing::debug!(room = %id, "Generated room id collided, retrying");
                    }

                    match created {
                        Some(id) => id,
                        None => {
                            self.transport.send(connection_id, ServerEvent::RoomError {
                                error: "Could not allocate a room id".to_string(),
                            });
                            return;
                        }
                    }
                }
            };

            state
                .connections
                .put(connection_id, display_name.clone(), room_id.clone());
            self.transport.join(connection_id, &room_id);
            self.stats.room_opened();

            self.transport.send(connection_id, ServerEvent::RoomCreated {
                room_id: room_id.clone(),
                is_creator: true,
            });
            self.transport.broadcast(
                &room_id,
                ServerEvent::RoomUsers(state.rooms.members(&room_id)),
                None,
            );

            tracing::info!(
                connection_id = %connection_id,
                room = %room_id,
                display_name = %display_name,
                "Room created"
            );

            HistoryEvent::now(HistoryKind::RoomCreated, room_id, display_name)
        };

        self.record_history(history_event);
    }

    async fn join_room(&self, connection_id: ConnectionId, room_id: String, display_name: String) {
        let history_event = {
            let mut state = self.state.lock().await;

            if state.connections.get(connection_id).is_some() {
                tracing::debug!(
                    connection_id = %connection_id,
                    "join-room from connection already in a room ignored"
                );
                return;
            }

            let member = PeerInfo::new(connection_id, display_name.clone());

            if let Err(e) = state.rooms.add_member(&room_id, member.clone()) {
                tracing::debug!(
                    connection_id = %connection_id,
                    room = %room_id,
                    "Join rejected"
                );
                self.transport.send(connection_id, ServerEvent::RoomError {
                    error: e.client_message().to_string(),
                });
                return;
            }

            state
                .connections
                .put(connection_id, display_name.clone(), room_id.clone());

            let members = state.rooms.members(&room_id);
            let existing: Vec<PeerInfo> = members
                .iter()
                .filter(|m| m.connection_id != connection_id)
                .cloned()
                .collect();

            // The joiner learns who was already there, the others learn about
            // the joiner, and everyone gets the refreshed full list.
            self.transport
                .send(connection_id, ServerEvent::ExistingUsers(existing));
            self.transport.send(connection_id, ServerEvent::RoomJoined {
                room_id: room_id.clone(),
                is_creator: false,
            });
            self.transport.broadcast(
                &room_id,
                ServerEvent::UserJoined(member),
                Some(connection_id),
            );

            self.transport.join(connection_id, &room_id);
            self.transport
                .broadcast(&room_id, ServerEvent::RoomUsers(members), None);

            tracing::info!(
                connection_id = %connection_id,
                room = %room_id,
                display_name = %display_name,
                "Peer joined room"
            );

            HistoryEvent::now(HistoryKind::PeerJoined, room_id, display_name)
        };

        self.record_history(history_event);
    }

    /// Forward a negotiation event to its target, verbatim
    ///
    /// No room-membership validation and no delivery confirmation: a dead
    /// target is a silent no-op at the transport.
    fn relay(&self, target: ConnectionId, event: ServerEvent) {
        tracing::trace!(target = %target, event = event.name(), "Relaying");
        self.transport.send(target, event);
        self.stats.event_relayed();
    }

    async fn chat_message(&self, connection_id: ConnectionId, text: String) {
        let state = self.state.lock().await;

        let Some(entry) = state.connections.get(connection_id) else {
            // Client sent chat before joining a room; drop it.
            tracing::debug!(connection_id = %connection_id, "Chat from roomless connection dropped");
            return;
        };

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        self.transport.broadcast(
            &entry.room_id,
            ServerEvent::ChatMessage {
                display_name: entry.display_name.clone(),
                text,
                timestamp,
            },
            None,
        );
        self.stats.chat_message();
    }

    async fn mute_status(&self, connection_id: ConnectionId, is_muted: bool, display_name: String) {
        let state = self.state.lock().await;

        let Some(entry) = state.connections.get(connection_id) else {
            tracing::debug!(connection_id = %connection_id, "Mute status from roomless connection dropped");
            return;
        };

        self.transport.broadcast(
            &entry.room_id,
            ServerEvent::MuteStatus {
                display_name,
                connection_id,
                is_muted,
            },
            Some(connection_id),
        );
    }

    fn record_history(&self, event: HistoryEvent) {
        if let Err(e) = self.history.record(event) {
            tracing::warn!(error = %e, "History recorder failed");
        }
    }

    /// Whether a room currently exists
    pub async fn room_exists(&self, room_id: &str) -> bool {
        self.state.lock().await.rooms.exists(room_id)
    }

    /// Current members of a room, in join order
    pub async fn members(&self, room_id: &str) -> Vec<PeerInfo> {
        self.state.lock().await.rooms.members(room_id)
    }

    /// Number of active rooms
    pub async fn room_count(&self) -> usize {
        self.state.lock().await.rooms.room_count()
    }

    /// Number of connections currently in a room
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// Verify the bidirectional registry invariant, for tests
    ///
    /// Every room member must have a connection entry pointing back at that
    /// room, and every connection entry's room must exist and list it.
    #[cfg(test)]
    async fn is_consistent(&self) -> bool {
        let state = self.state.lock().await;

        for room_id in state.rooms.room_ids() {
            if state.rooms.is_empty(&room_id) {
                return false;
            }
            for member in state.rooms.members(&room_id) {
                match state.connections.get(member.connection_id) {
                    Some(entry) if entry.room_id == room_id => {}
                    _ => return false,
                }
            }
        }

        for (id, entry) in state.connections.iter() {
            let in_room = state
                .rooms
                .members(&entry.room_id)
                .iter()
                .any(|m| m.connection_id == id);
            if !in_room {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use serde_json::json;

    fn coordinator() -> SignalingCoordinator<RecordingTransport> {
        SignalingCoordinator::new(Arc::new(RecordingTransport::new()))
    }

    fn create(name: &str, room: Option<&str>) -> ClientEvent {
        ClientEvent::CreateRoom {
            display_name: name.to_string(),
            custom_room_id: room.map(str::to_string),
        }
    }

    fn join(room: &str, name: &str) -> ClientEvent {
        ClientEvent::JoinRoom {
            room_id: room.to_string(),
            display_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_join_disconnect_scenario() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        // A creates room "ABCD" as Alice
        coord.handle_event(a, create("Alice", Some("ABCD"))).await;

        let to_a = coord.transport.sent_to(a);
        assert_eq!(
            to_a[0],
            ServerEvent::RoomCreated {
                room_id: "ABCD".to_string(),
                is_creator: true,
            }
        );
        assert!(matches!(&to_a[1], ServerEvent::RoomUsers(users) if users.len() == 1));
        coord.transport.clear();

        // B joins as Bob
        coord.handle_event(b, join("ABCD", "Bob")).await;

        let to_b = coord.transport.sent_to(b);
        assert_eq!(
            to_b[0],
            ServerEvent::ExistingUsers(vec![PeerInfo::new(a, "Alice")])
        );
        assert_eq!(
            to_b[1],
            ServerEvent::RoomJoined {
                room_id: "ABCD".to_string(),
                is_creator: false,
            }
        );
        assert!(matches!(&to_b[2], ServerEvent::RoomUsers(users) if users.len() == 2));

        let to_a = coord.transport.sent_to(a);
        assert_eq!(to_a[0], ServerEvent::UserJoined(PeerInfo::new(b, "Bob")));
        assert!(matches!(&to_a[1], ServerEvent::RoomUsers(users) if users.len() == 2));

        assert!(coord.is_consistent().await);
        coord.transport.clear();

        // B disconnects: A is notified, room survives
        coord.handle_disconnect(b).await;

        let to_a = coord.transport.sent_to(a);
        assert_eq!(to_a[0], ServerEvent::UserLeft(PeerInfo::new(b, "Bob")));
        assert!(matches!(&to_a[1], ServerEvent::RoomUsers(users) if users.len() == 1));
        assert!(coord.room_exists("ABCD").await);
        assert!(coord.is_consistent().await);

        // A disconnects: room is gone
        coord.handle_disconnect(a).await;
        assert!(!coord.room_exists("ABCD").await);
        assert_eq!(coord.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_join_nonexistent_room() {
        let coord = coordinator();
        let a = ConnectionId(1);

        coord.handle_event(a, join("NOPE", "Alice")).await;

        let to_a = coord.transport.sent_to(a);
        assert_eq!(
            to_a,
            vec![ServerEvent::RoomError {
                error: "Room does not exist".to_string(),
            }]
        );
        // Zero registry mutation
        assert_eq!(coord.room_count().await, 0);
        assert_eq!(coord.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_room() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some("XYZ"))).await;
        coord.transport.clear();
        coord.handle_event(b, create("Bob", Some("XYZ"))).await;

        let to_b = coord.transport.sent_to(b);
        assert_eq!(
            to_b,
            vec![ServerEvent::RoomError {
                error: "Room already exists".to_string(),
            }]
        );

        // Existing room untouched
        let members = coord.members("XYZ").await;
        assert_eq!(members, vec![PeerInfo::new(a, "Alice")]);
        assert_eq!(coord.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_create() {
        let coord = Arc::new(coordinator());
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        let c1 = Arc::clone(&coord);
        let c2 = Arc::clone(&coord);
        let t1 = tokio::spawn(async move { c1.handle_event(a, create("Alice", Some("XYZ"))).await });
        let t2 = tokio::spawn(async move { c2.handle_event(b, create("Bob", Some("XYZ"))).await });
        let _ = tokio::join!(t1, t2);

        let mut created = 0;
        let mut errored = 0;
        for (_, event) in coord.transport.all() {
            match event {
                ServerEvent::RoomCreated { .. } => created += 1,
                ServerEvent::RoomError { .. } => errored += 1,
                _ => {}
            }
        }

        // Exactly one wins, the other is told the room exists
        assert_eq!(created, 1);
        assert_eq!(errored, 1);
        assert_eq!(coord.members("XYZ").await.len(), 1);
        assert!(coord.is_consistent().await);
    }

    #[tokio::test]
    async fn test_create_with_generated_id() {
        let coord = coordinator();
        let a = ConnectionId(1);

        coord.handle_event(a, create("Alice", None)).await;

        let to_a = coord.transport.sent_to(a);
        let ServerEvent::RoomCreated { room_id, is_creator } = &to_a[0] else {
            panic!("expected room-created, got {:?}", to_a[0]);
        };
        assert!(*is_creator);
        assert_eq!(room_id.len(), 6);
        assert!(coord.room_exists(room_id).await);
    }

    #[tokio::test]
    async fn test_empty_custom_id_gets_generated_id() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some(""))).await;
        coord.handle_event(b, create("Bob", Some("   "))).await;

        for conn in [a, b] {
            let to_conn = coord.transport.sent_to(conn);
            let ServerEvent::RoomCreated { room_id, .. } = &to_conn[0] else {
                panic!("expected room-created, got {:?}", to_conn[0]);
            };
            assert_eq!(room_id.len(), 6);
            assert!(coord.room_exists(room_id).await);
        }
        assert!(!coord.room_exists("").await);
        assert!(!coord.room_exists("   ").await);
    }

    #[tokio::test]
    async fn test_room_id_reusable_after_deletion() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord.handle_disconnect(a).await;
        assert!(!coord.room_exists("ABCD").await);

        coord.transport.clear();
        coord.handle_event(b, create("Bob", Some("ABCD"))).await;

        let to_b = coord.transport.sent_to(b);
        assert!(matches!(&to_b[0], ServerEvent::RoomCreated { .. }));
    }

    #[tokio::test]
    async fn test_relay_tags_sender_and_keeps_payload() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);
        let payload = json!({"sdp": "v=0...", "type": "offer"});

        coord
            .handle_event(a, ClientEvent::Offer {
                target: b,
                payload: payload.clone(),
            })
            .await;

        let to_b = coord.transport.sent_to(b);
        assert_eq!(to_b, vec![ServerEvent::Offer { payload, sender: a }]);
    }

    #[tokio::test]
    async fn test_relay_to_dead_target_is_silent() {
        let coord = coordinator();
        let a = ConnectionId(1);

        coord
            .handle_event(a, ClientEvent::IceCandidate {
                target: ConnectionId(999),
                payload: json!(null),
            })
            .await;

        // Sender is not told anything
        assert!(coord.transport.sent_to(a).is_empty());
    }

    #[tokio::test]
    async fn test_chat_includes_sender() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord.handle_event(b, join("ABCD", "Bob")).await;
        coord.transport.clear();

        coord
            .handle_event(a, ClientEvent::ChatMessage {
                text: "hello".to_string(),
            })
            .await;

        for conn in [a, b] {
            let events = coord.transport.sent_to(conn);
            assert_eq!(events.len(), 1);
            let ServerEvent::ChatMessage {
                display_name,
                text,
                timestamp,
            } = &events[0]
            else {
                panic!("expected chat-message, got {:?}", events[0]);
            };
            assert_eq!(display_name, "Alice");
            assert_eq!(text, "hello");
            assert!(*timestamp > 0);
        }
    }

    #[tokio::test]
    async fn test_chat_without_room_is_dropped() {
        let coord = coordinator();

        coord
            .handle_event(ConnectionId(1), ClientEvent::ChatMessage {
                text: "hello?".to_string(),
            })
            .await;

        assert!(coord.transport.all().is_empty());
    }

    #[tokio::test]
    async fn test_mute_status_excludes_sender() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord.handle_event(b, join("ABCD", "Bob")).await;
        coord.transport.clear();

        coord
            .handle_event(b, ClientEvent::MuteStatus {
                is_muted: true,
                display_name: "Bob".to_string(),
            })
            .await;

        assert!(coord.transport.sent_to(b).is_empty());
        let to_a = coord.transport.sent_to(a);
        assert_eq!(
            to_a,
            vec![ServerEvent::MuteStatus {
                display_name: "Bob".to_string(),
                connection_id: b,
                is_muted: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_room_action_while_in_room_is_ignored() {
        let coord = coordinator();
        let a = ConnectionId(1);
        let b = ConnectionId(2);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord.handle_event(b, create("Bob", Some("WXYZ"))).await;
        coord.transport.clear();

        // A is already in ABCD; both actions are dropped without a reply
        coord.handle_event(a, join("WXYZ", "Alice")).await;
        coord.handle_event(a, create("Alice", Some("QRST"))).await;

        assert!(coord.transport.all().is_empty());
        assert_eq!(coord.members("WXYZ").await.len(), 1);
        assert!(!coord.room_exists("QRST").await);
        assert!(coord.is_consistent().await);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let coord = coordinator();
        let a = ConnectionId(1);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord.handle_disconnect(a).await;
        coord.transport.clear();

        // Second close for the same connection does nothing
        coord.handle_disconnect(a).await;
        assert!(coord.transport.all().is_empty());
    }

    #[tokio::test]
    async fn test_registries_stay_consistent() {
        let coord = coordinator();

        coord
            .handle_event(ConnectionId(1), create("Alice", Some("ABCD")))
            .await;
        coord.handle_event(ConnectionId(2), join("ABCD", "Bob")).await;
        coord
            .handle_event(ConnectionId(3), create("Carol", Some("WXYZ")))
            .await;
        coord
            .handle_event(ConnectionId(4), join("WXYZ", "Dave"))
            .await;
        assert!(coord.is_consistent().await);

        coord.handle_disconnect(ConnectionId(1)).await;
        assert!(coord.is_consistent().await);

        coord.handle_disconnect(ConnectionId(3)).await;
        coord.handle_disconnect(ConnectionId(4)).await;
        assert!(coord.is_consistent().await);
        assert_eq!(coord.room_count().await, 1);
        assert_eq!(coord.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_stats_track_rooms_and_relays() {
        let stats = Arc::new(SignalingStats::new());
        let coord = SignalingCoordinator::new(Arc::new(RecordingTransport::new()))
            .with_stats(Arc::clone(&stats));
        let a = ConnectionId(1);

        coord.handle_event(a, create("Alice", Some("ABCD"))).await;
        coord
            .handle_event(a, ClientEvent::Offer {
                target: ConnectionId(2),
                payload: json!(null),
            })
            .await;

        let snap = stats.snapshot();
        assert_eq!(snap.active_rooms, 1);
        assert_eq!(snap.events_relayed, 1);

        coord.handle_disconnect(a).await;
        assert_eq!(stats.snapshot().active_rooms, 0);
    }
}
