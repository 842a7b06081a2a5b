//! Bundled TCP signaling server
//!
//! A complete transport for the coordinator: a tokio TCP listener framing
//! newline-delimited JSON events, one spawned task per client connection,
//! connection ids from an atomic counter, and an optional connection limit.
//!
//! The coordinator itself is transport-agnostic; this module is what makes
//! the crate runnable out of the box.

pub mod config;
mod connection;
pub mod listener;

pub use config::ServerConfig;
pub use listener::SignalingServer;
