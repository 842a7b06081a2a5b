//! Per-connection event pump
//!
//! One task per accepted socket. Frames are newline-delimited JSON: inbound
//! lines are parsed into [`ClientEvent`]s and handed to the coordinator,
//! outbound [`ServerEvent`]s arrive over the connection's transport channel
//! and are written back.
//!
//! Malformed or unrecognized frames are dropped with a debug log; one
//! misbehaving client must not disrupt anyone else's signaling. Oversized
//! frames close the connection.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;

use crate::coordinator::SignalingCoordinator;
use crate::error::{Error, Result};
use crate::protocol::{ClientEvent, ConnectionId};
use crate::server::config::ServerConfig;
use crate::transport::ChannelTransport;

/// State for one live client connection
pub(super) struct Connection {
    connection_id: ConnectionId,
    socket: TcpStream,
    peer_addr: SocketAddr,
    config: ServerConfig,
    coordinator: Arc<SignalingCoordinator<ChannelTransport>>,
    transport: Arc<ChannelTransport>,
}

impl Connection {
    pub(super) fn new(
        connection_id: ConnectionId,
        socket: TcpStream,
        peer_addr: SocketAddr,
        config: ServerConfig,
        coordinator: Arc<SignalingCoordinator<ChannelTransport>>,
        transport: Arc<ChannelTransport>,
    ) -> Self {
        Self {
            connection_id,
            socket,
            peer_addr,
            config,
            coordinator,
            transport,
        }
    }

    /// Pump events until the client hangs up or errors
    ///
    /// Registry cleanup is NOT done here; the caller must invoke the
    /// coordinator's disconnect handling after `run` returns, success or not.
    pub(super) async fn run(self) -> Result<()> {
        let mut outbound = self.transport.register(self.connection_id);

        let (read_half, write_half) = self.socket.into_split();
        let mut reader = BufReader::new(read_half);
        let mut writer = BufWriter::new(write_half);

        // Persists across select! iterations so a cancelled read loses nothing.
        let mut inbound = Vec::new();

        loop {
            tokio::select! {
                line = read_frame(&mut reader, &mut inbound, self.config.max_frame_bytes) => {
                    let Some(line) = line? else {
                        // EOF: client hung up
                        break;
                    };

                    if line.trim().is_empty() {
                        continue;
                    }

                    match serde_json::from_str::<ClientEvent>(&line) {
                        Ok(event) => {
                            self.coordinator
                                .handle_event(self.connection_id, event)
                                .await;
                        }
                        Err(e) => {
                            tracing::debug!(
                                connection_id = %self.connection_id,
                                peer = %self.peer_addr,
                                error = %e,
                                "Ignoring malformed frame"
                            );
                        }
                    }
                }

                event = outbound.recv() => {
                    let Some(event) = event else {
                        // Transport unregistered us; nothing more to deliver
                        break;
                    };

                    let mut frame = serde_json::to_vec(&event)?;
                    frame.push(b'\n');
                    writer.write_all(&frame).await?;
                    writer.flush().await?;
                }
            }
        }

        Ok(())
    }
}

/// Read one newline-terminated frame, buffering at most `max` + 1 bytes
///
/// The byte budget is enforced on the read itself: a client streaming
/// arbitrarily many bytes without a newline fails with
/// [`Error::FrameTooLarge`] as soon as the budget is exhausted, not after the
/// whole stream has been buffered. Returns `Ok(None)` on a clean EOF.
async fn read_frame(
    reader: &mut BufReader<OwnedReadHalf>,
    buf: &mut Vec<u8>,
    max: usize,
) -> Result<Option<String>> {
    loop {
        let budget = (max + 1).saturating_sub(buf.len());
        if budget == 0 {
            return Err(Error::FrameTooLarge {
                size: buf.len(),
                max,
            });
        }

        let n = (&mut *reader)
            .take(budget as u64)
            .read_until(b'\n', buf)
            .await?;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            let line = String::from_utf8_lossy(buf).into_owned();
            buf.clear();
            return Ok(Some(line));
        }

        if n == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            // Trailing data without a final newline, then EOF
            let line = String::from_utf8_lossy(buf).into_owned();
            buf.clear();
            return Ok(Some(line));
        }

        // Budget exhausted before a delimiter; next iteration reports the
        // overflow once the accumulated frame exceeds `max`.
    }
}
