//! APDU response definitions
//!
//! This module provides the response type returned by a card according to
//! ISO/IEC 7816-4: an optional payload followed by the two status bytes.

pub mod status;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::Error;
use status::StatusWord;

/// Basic APDU response structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response payload data, `None` when the card returned only a status word
    payload: Option<Bytes>,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Create a new response with payload and status
    ///
    /// An empty payload is normalised to `None`.
    pub fn new(payload: Option<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            payload: payload.filter(|p| !p.is_empty()),
            status: status.into(),
        }
    }

    /// Create a success response
    pub fn success(payload: Option<Bytes>) -> Self {
        Self::new(payload, StatusWord::new(0x90, 0x00))
    }

    /// Create an error response from a status word
    pub fn error(status: impl Into<StatusWord>) -> Self {
        Self {
            payload: None,
            status: status.into(),
        }
    }

    /// Parse response from raw bytes (payload followed by SW1 SW2)
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < 2 {
            debug!("Response too short: {} bytes", data.len());
            return Err(Error::parse("response shorter than a status word"));
        }

        let len = data.len();
        let status = StatusWord::new(data[len - 2], data[len - 1]);
        let payload = (len > 2).then(|| Bytes::copy_from_slice(&data[..len - 2]));

        trace!(
            sw1 = format_args!("{:#04x}", status.sw1),
            sw2 = format_args!("{:#04x}", status.sw2),
            payload_len = payload.as_ref().map_or(0, Bytes::len),
            "Parsed APDU response"
        );

        Ok(Self { payload, status })
    }

    /// Get the response payload data
    pub const fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Get the status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the response indicates success (90 00)
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Take the payload out of the response
    pub fn into_payload(self) -> Option<Bytes> {
        self.payload
    }
}
