//! Error types specific to card transport

/// Transport error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection error
    #[error("Failed to connect to device")]
    Connection,

    /// Transmission error
    #[error("Failed to transmit data")]
    Transmission,

    /// Device error
    #[error("Device error")]
    Device,

    /// Buffer too small
    #[error("Buffer too small")]
    BufferTooSmall,

    /// Driver error (with code)
    #[error("Driver error code: {0}")]
    Driver(i32),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create a transport error carrying a message
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other(message.into())
    }
}
