//! Core types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types and traits for talking to smart cards
//! with APDU commands and responses according to ISO/IEC 7816-4.
//!
//! ## Overview
//!
//! - [`Command`]: an immutable command frame whose `Lc` always matches its data
//! - [`Response`]: the card's reply, split into payload and [`StatusWord`]
//! - [`CardTransport`]: the single "send a command, receive a response" capability
//!   implemented by physical reader backends and test doubles
//!
//! Length fields are serialized with a [`LengthWidth`] chosen by the transport, so the
//! same command can be sent as a short (1-byte `Lc`/`Le`) or a legacy two-byte frame.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod command;
pub mod response;
pub mod transport;

// Core error types
mod error;
pub use error::{Error, Result};

// Re-exports for common types
pub use command::{Command, LengthWidth};
pub use response::Response;
pub use response::status::StatusWord;
pub use transport::{CardTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        Bytes, BytesMut, Command, Error, LengthWidth, Response, Result,
        response::status::StatusWord,
        transport::{CardTransport, TransportError},
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test the basic types are re-exported correctly
    #[test]
    fn test_reexports() {
        let cmd = Command::new(0x00, 0xA4, 0x04, 0x00);
        assert_eq!(cmd.class(), 0x00);
        assert_eq!(cmd.instruction(), 0xA4);
        assert_eq!(cmd.p1(), 0x04);
        assert_eq!(cmd.p2(), 0x00);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let resp = Response::success(Some(data.clone()));
        assert!(resp.is_success());
        assert_eq!(resp.payload(), Some(&data));
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
    }
}
