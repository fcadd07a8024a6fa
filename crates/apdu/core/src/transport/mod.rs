//! Transport traits for APDU communication with cards
//!
//! This module provides the abstraction a physical reader backend implements to
//! move command frames to a card and response frames back.

pub mod error;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;
use tracing::{Level, debug, info, trace, warn};

use crate::{Command, Error, LengthWidth, Response};

/// Trait for basic card transports
///
/// A transport is responsible for sending and receiving raw APDU bytes. It is
/// synchronous and half-duplex: `&mut self` guarantees a single command in flight.
/// Transports never retry on their own.
pub trait CardTransport: Send + fmt::Debug {
    /// Send raw APDU bytes to card and return response bytes
    ///
    /// This method should handle the low-level communication with the card
    /// but should not interpret the contents.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = ?hex::encode(command), "Transmitting raw command");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => {
                trace!(response = ?hex::encode(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = ?e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transmit_raw
    /// This is the method that concrete implementations should override
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Width of the `Lc`/`Le` fields this transport expects
    fn length_width(&self) -> LengthWidth {
        LengthWidth::Short
    }

    /// Serialize a command, send it and parse the card's response
    fn transmit(&mut self, command: &Command) -> Result<Response, Error> {
        let frame = command.to_bytes(self.length_width())?;
        let raw = self.transmit_raw(&frame)?;
        let response = Response::from_bytes(&raw)?;

        let status = response.status();
        let ins = command.instruction();
        let level = status.tracing_level();
        if level == Level::WARN {
            warn!(ins = format_args!("{:#04x}", ins), status = %status, "{}", status.description());
        } else if level == Level::INFO {
            info!(ins = format_args!("{:#04x}", ins), status = %status, "{}", status.description());
        } else {
            debug!(ins = format_args!("{:#04x}", ins), status = %status, "{}", status.description());
        }

        Ok(response)
    }

    /// Check if the transport is connected to a physical card
    fn is_connected(&self) -> bool;

    /// Reset the transport connection
    fn reset(&mut self) -> Result<(), TransportError>;
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct MockTransport {
    /// Mock responses to return
    pub(crate) responses: Vec<Bytes>,
    /// Commands that were sent
    pub(crate) commands: Vec<Bytes>,
    /// Whether the transport is connected
    pub(crate) connected: bool,
    /// Width used to serialize commands
    pub(crate) width: LengthWidth,
}

#[cfg(test)]
impl MockTransport {
    /// Create a new mock transport with the given responses
    pub(crate) fn new(responses: Vec<Bytes>) -> Self {
        Self {
            responses,
            commands: Vec::new(),
            connected: true,
            width: LengthWidth::Short,
        }
    }

    /// Create a new mock transport that always returns success (90 00)
    pub(crate) fn with_success() -> Self {
        Self::new(vec![Bytes::from_static(&[0x90, 0x00])])
    }
}

#[cfg(test)]
impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::Connection);
        }

        self.commands.push(Bytes::copy_from_slice(command));

        if self.responses.is_empty() {
            return Err(TransportError::Transmission);
        }

        // Either clone the single response or take the next one
        if self.responses.len() == 1 {
            Ok(self.responses[0].clone())
        } else {
            Ok(self.responses.remove(0))
        }
    }

    fn length_width(&self) -> LengthWidth {
        self.width
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.connected = true;
        self.commands.clear();
        Ok(())
    }
}
