//! Signaling server listener
//!
//! Handles the TCP accept loop, assigns connection identifiers, and spawns
//! one event-pump task per client. Disconnect cleanup always runs when a
//! connection task finishes, whether the client hung up cleanly or errored.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::coordinator::SignalingCoordinator;
use crate::error::Result;
use crate::history::{HistoryRecorder, NullRecorder};
use crate::protocol::ConnectionId;
use crate::server::config::ServerConfig;
use crate::server::connection::Connection;
use crate::stats::SignalingStats;
use crate::transport::ChannelTransport;

/// Signaling server
pub struct SignalingServer {
    config: ServerConfig,
    coordinator: Arc<SignalingCoordinator<ChannelTransport>>,
    transport: Arc<ChannelTransport>,
    stats: Arc<SignalingStats>,
    next_connection_id: AtomicU64,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl SignalingServer {
    /// Create a new server with no history recording
    pub fn new(config: ServerConfig) -> Self {
        Self::with_recorder(config, Arc::new(NullRecorder))
    }

    /// Create a new server with a call-history recorder
    pub fn with_recorder(config: ServerConfig, history: Arc<dyn HistoryRecorder>) -> Self {
        let transport = Arc::new(ChannelTransport::new());
        let stats = Arc::new(SignalingStats::new());
        let coordinator = Arc::new(
            SignalingCoordinator::new(Arc::clone(&transport))
                .with_history(history)
                .with_stats(Arc::clone(&stats)),
        );

        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        Self {
            config,
            coordinator,
            transport,
            stats,
            next_connection_id: AtomicU64::new(1),
            connection_semaphore,
        }
    }

    /// Get a reference to the coordinator
    pub fn coordinator(&self) -> &Arc<SignalingCoordinator<ChannelTransport>> {
        &self.coordinator
    }

    /// Get a reference to the server stats
    pub fn stats(&self) -> &Arc<SignalingStats> {
        &self.stats
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Signaling server listening");

        self.serve(listener).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Signaling server listening");

        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.serve(listener) => result,
        }
    }

    /// Accept connections on an already-bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        // Check connection limit; the permit lives as long as the connection task
        let permit = if let Some(ref sem) = self.connection_semaphore {
            match sem.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!(peer = %peer_addr, "Connection rejected: limit reached");
                    return;
                }
            }
        } else {
            None
        };

        let connection_id =
            ConnectionId(self.next_connection_id.fetch_add(1, Ordering::Relaxed));

        tracing::debug!(
            connection_id = %connection_id,
            peer = %peer_addr,
            "New connection"
        );

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::error!(error = %e, "Failed to configure socket");
                return;
            }
        }

        self.stats.connection_opened();

        let config = self.config.clone();
        let coordinator = Arc::clone(&self.coordinator);
        let transport = Arc::clone(&self.transport);
        let stats = Arc::clone(&self.stats);

        tokio::spawn(async move {
            let _permit = permit;

            let connection = Connection::new(
                connection_id,
                socket,
                peer_addr,
                config,
                Arc::clone(&coordinator),
                Arc::clone(&transport),
            );

            if let Err(e) = connection.run().await {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "Connection error"
                );
            }

            // Cleanup runs exactly once per transport-level close
            coordinator.handle_disconnect(connection_id).await;
            transport.unregister(connection_id);
            stats.connection_closed();

            tracing::debug!(connection_id = %connection_id, "Connection closed");
        });
    }
}
