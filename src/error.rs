//! Crate error types
//!
//! Errors on the server/transport path. The coordinator itself has no fatal
//! errors; client mistakes travel as `room-error` events and races are
//! silent no-ops.

/// Result type for server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for server operations
#[derive(Debug)]
pub enum Error {
    /// I/O error on the listener or a connection
    Io(std::io::Error),
    /// Outbound event failed to serialize
    Json(serde_json::Error),
    /// Inbound frame exceeded the configured limit
    FrameTooLarge {
        /// Size of the offending frame
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::FrameTooLarge { size, max } => {
                write!(f, "Frame too large: {} bytes (max {})", size, max)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::FrameTooLarge { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
