//! Connection-event protocol
//!
//! Defines the typed events exchanged between clients and the signaling
//! coordinator. The protocol is a closed tagged union: one variant per event
//! name, with explicit fields. Anything a client sends that does not parse
//! into [`ClientEvent`] is dropped by the transport layer rather than
//! trusted at runtime.
//!
//! Negotiation payloads (offer/answer/ice-candidate) are opaque to this
//! crate. They are carried as raw JSON values and forwarded verbatim; only
//! the `target`/`sender` routing fields are interpreted.

pub mod event;

pub use event::{ClientEvent, ConnectionId, PeerInfo, ServerEvent};
