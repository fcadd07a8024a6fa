//! Card session
//!
//! A [`Dnie`] owns the transport for exactly one top-level operation (certificate
//! extraction or signing) and is built through [`DnieBuilder`].

use std::fmt;

use dnie_apdu_core::{CardTransport, Command, Response, StatusWord};
use tracing::{debug, warn};

use crate::commands;
use crate::error::ProtocolStep;
use crate::hash::HashAlgorithm;
use crate::types::Progress;
use crate::{Error, Result};

/// Type for function that provides an input string (ie. PIN)
///
/// An `Err` means no PIN could be obtained (terminal closed, input cancelled).
pub type InputRequestFn = Box<dyn Fn(&str) -> std::io::Result<String> + Send + Sync>;
/// Type for function that receives progress notifications
pub type ProgressFn = Box<dyn Fn(Progress) + Send + Sync>;

/// Prompt passed to the PIN provider
pub(crate) const PIN_PROMPT: &str = "Enter DNIe PIN";

/// A session with a DNIe over some transport
pub struct Dnie<T: CardTransport> {
    /// Open transport
    transport: T,
    /// Hash applied to data before signing
    hash_algorithm: Option<HashAlgorithm>,
    /// PIN provider
    ///
    /// When None, operations requiring the PIN fail
    input_request_callback: Option<InputRequestFn>,
    /// Optional progress listener
    progress_callback: Option<ProgressFn>,
}

impl<T: CardTransport> fmt::Debug for Dnie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dnie")
            .field("transport", &self.transport)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("has_pin_provider", &self.input_request_callback.is_some())
            .field("has_progress", &self.progress_callback.is_some())
            .finish()
    }
}

impl<T: CardTransport> Dnie<T> {
    /// Start building a session
    pub fn builder() -> DnieBuilder<T> {
        DnieBuilder::new()
    }

    /// Hash algorithm used for signing, if configured
    pub const fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        self.hash_algorithm
    }

    /// Borrow the underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the underlying transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// End the session and hand back the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    pub(crate) fn report(&self, progress: Progress) {
        debug!("{progress}");
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }

    pub(crate) fn transmit(&mut self, command: &Command) -> Result<Response> {
        Ok(self.transport.transmit(command)?)
    }

    /// Ask the PIN provider for the PIN
    pub(crate) fn request_pin(&self) -> Result<String> {
        let request = self
            .input_request_callback
            .as_ref()
            .ok_or(Error::Configuration("no PIN provider configured"))?;
        request(PIN_PROMPT).map_err(Error::PinUnavailable)
    }

    pub(crate) fn select_pki_application(&mut self) -> Result<()> {
        self.report(Progress::SelectingPkiApplication);
        let response = self.transmit(&commands::select_pki_application())?;
        ensure_success(&response, ProtocolStep::SelectPki)
    }
}

/// Fail with a protocol error for `step` unless the card answered `90 00`
pub(crate) fn ensure_success(response: &Response, step: ProtocolStep) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(protocol_failure(step, response.status()))
}

pub(crate) fn protocol_failure(step: ProtocolStep, status: StatusWord) -> Error {
    warn!(%step, %status, "{}", status.description());
    Error::protocol(step, status)
}

/// Builder for [`Dnie`]; the transport is required
pub struct DnieBuilder<T: CardTransport> {
    transport: Option<T>,
    hash_algorithm: Option<HashAlgorithm>,
    input_request_callback: Option<InputRequestFn>,
    progress_callback: Option<ProgressFn>,
}

impl<T: CardTransport> fmt::Debug for DnieBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnieBuilder")
            .field("transport", &self.transport)
            .field("hash_algorithm", &self.hash_algorithm)
            .finish_non_exhaustive()
    }
}

impl<T: CardTransport> Default for DnieBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CardTransport> DnieBuilder<T> {
    /// Create an empty builder
    pub const fn new() -> Self {
        Self {
            transport: None,
            hash_algorithm: None,
            input_request_callback: None,
            progress_callback: None,
        }
    }

    /// Set the transport to the card
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the hash algorithm used for signing
    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = Some(algorithm);
        self
    }

    /// Set the function asked for the PIN
    pub fn pin_provider(mut self, callback: InputRequestFn) -> Self {
        self.input_request_callback = Some(callback);
        self
    }

    /// Set the function notified of protocol progress
    pub fn progress(mut self, callback: ProgressFn) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Build the session
    pub fn build(self) -> Result<Dnie<T>> {
        let transport = self
            .transport
            .ok_or(Error::Configuration("a transport is required"))?;

        Ok(Dnie {
            transport,
            hash_algorithm: self.hash_algorithm,
            input_request_callback: self.input_request_callback,
            progress_callback: self.progress_callback,
        })
    }
}
