//! Core error type for all APDU operations
//!
//! Command construction, frame parsing and transport failures all end up here so
//! callers only deal with a single error type at the APDU layer.

use crate::transport::TransportError;

/// Result type for APDU operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A command was built with inconsistent fields (never retried)
    #[error("Invalid command: {0}")]
    Validation(&'static str),

    /// The reader or connection failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Raw response bytes could not be parsed
    #[error("Parse error: {0}")]
    Parse(&'static str),
}

impl Error {
    /// Create a new validation error
    pub const fn validation(message: &'static str) -> Self {
        Self::Validation(message)
    }

    /// Create a new parse error
    pub const fn parse(message: &'static str) -> Self {
        Self::Parse(message)
    }
}
