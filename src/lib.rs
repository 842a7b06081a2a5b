//! Room-based signaling relay for WebRTC peer-to-peer calls
//!
//! This crate brokers room membership and forwards opaque session-negotiation
//! messages (offers, answers, ICE candidates) between peers that establish
//! their own direct media transport. It never inspects negotiation payloads;
//! it only routes them by connection id.
//!
//! # Architecture
//!
//! ```text
//!   client ──frames──► server::Connection ──ClientEvent──► SignalingCoordinator
//!                                                          │  Mutex<
//!                                                          │    RoomRegistry,
//!                                                          │    ConnectionRegistry,
//!                                                          │  >
//!   client ◄─frames── transport channel ◄──ServerEvent─────┘
//! ```
//!
//! The [`coordinator::SignalingCoordinator`] owns both in-memory registries
//! behind a single lock and emits outbound events through the
//! [`transport::Transport`] seam, so it can be driven by the bundled TCP
//! server or by a fake transport in tests. Durable storage is out of scope:
//! the [`history::HistoryRecorder`] hook is fire-and-forget and failures are
//! logged, never surfaced to clients.
//!
//! # Quick start
//!
//! ```no_run
//! use signaling_rs::{ServerConfig, SignalingServer};
//!
//! #[tokio::main]
//! async fn main() -> signaling_rs::Result<()> {
//!     let config = ServerConfig::default().bind("127.0.0.1:3000".parse().unwrap());
//!     let server = SignalingServer::new(config);
//!     server.run().await
//! }
//! ```

pub mod coordinator;
pub mod error;
pub mod history;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod stats;
pub mod transport;

pub use coordinator::SignalingCoordinator;
pub use error::{Error, Result};
pub use protocol::{ClientEvent, ConnectionId, PeerInfo, ServerEvent};
pub use server::{ServerConfig, SignalingServer};
