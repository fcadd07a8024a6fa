//! PC/SC transport implementation

use std::{ffi::CString, fmt};

use dnie_apdu_core::prelude::*;
use pcsc::{Card, Context, Disposition};
use tracing::{debug, warn};

use crate::{config::PcscConfig, error::PcscError};

/// Transport implementation using PC/SC
pub struct PcscTransport {
    /// PC/SC context
    context: Context,
    /// Card connection, if established
    card: Option<Card>,
    /// Reader name
    reader_name: String,
    /// Configuration
    config: PcscConfig,
    /// Receive buffer sized for extended responses
    buffer: Vec<u8>,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("reader_name", &self.reader_name)
            .field("has_card", &self.card.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl PcscTransport {
    /// Create a new PC/SC transport and connect to the card in the reader
    pub(crate) fn new(
        context: Context,
        reader_name: &str,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let mut transport = Self {
            context,
            card: None,
            reader_name: reader_name.to_string(),
            config,
            buffer: vec![0u8; pcsc::MAX_BUFFER_SIZE_EXTENDED],
        };

        transport.connect_card()?;

        Ok(transport)
    }

    /// Try to connect to the card
    fn connect_card(&mut self) -> Result<(), PcscError> {
        if self.card.is_some() {
            return Ok(());
        }

        let reader_cstr = CString::new(self.reader_name.as_str())
            .map_err(|_| PcscError::ReaderNotFound(self.reader_name.clone()))?;

        match self.context.connect(
            &reader_cstr,
            self.config.share_mode.into(),
            self.config.protocols,
        ) {
            Ok(card) => {
                debug!(reader = %self.reader_name, "Connected to card");
                self.card = Some(card);
                Ok(())
            }
            Err(pcsc::Error::NoSmartcard) => Err(PcscError::NoCard(self.reader_name.clone())),
            Err(pcsc::Error::UnknownReader) => {
                Err(PcscError::ReaderNotFound(self.reader_name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the ATR of the current card
    pub fn atr(&self) -> Result<Vec<u8>, PcscError> {
        self.card.as_ref().map_or_else(
            || Err(PcscError::NoCard(self.reader_name.clone())),
            |card| {
                card.get_attribute_owned(pcsc::Attribute::AtrString)
                    .map_err(Into::into)
            },
        )
    }

    /// Get the reader name
    pub fn reader_name(&self) -> &str {
        &self.reader_name
    }

    /// Get the transport configuration
    pub const fn config(&self) -> &PcscConfig {
        &self.config
    }

    /// Transmit a command to the card, reconnecting once after a reset if configured
    fn transmit_command(&mut self, command: &[u8]) -> Result<Bytes, PcscError> {
        match self.transmit_once(command) {
            Err(PcscError::CardReset) if self.config.auto_reconnect => {
                warn!(reader = %self.reader_name, "Card was reset, reconnecting");
                self.connect_card()?;
                self.transmit_once(command)
            }
            result => result,
        }
    }

    fn transmit_once(&mut self, command: &[u8]) -> Result<Bytes, PcscError> {
        self.connect_card()?;

        let card = self
            .card
            .as_mut()
            .ok_or_else(|| PcscError::NoCard(self.reader_name.clone()))?;

        match card.transmit(command, &mut self.buffer) {
            Ok(response) => Ok(Bytes::copy_from_slice(response)),
            Err(e @ (pcsc::Error::ResetCard | pcsc::Error::RemovedCard)) => {
                // The handle is dead either way
                self.card = None;
                if e == pcsc::Error::ResetCard {
                    Err(PcscError::CardReset)
                } else {
                    Err(PcscError::CardRemoved)
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl CardTransport for PcscTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.transmit_command(command).map_err(TransportError::from)
    }

    fn length_width(&self) -> LengthWidth {
        self.config.length_width
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        if let Some(card) = self.card.take() {
            let _ = card.disconnect(Disposition::ResetCard);
        }

        self.connect_card().map_err(Into::into)
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            debug!(reader = %self.reader_name, "Disconnecting from card");
            let _ = card.disconnect(Disposition::LeaveCard);
        }
    }
}
