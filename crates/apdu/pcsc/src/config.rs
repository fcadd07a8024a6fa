//! Configuration options for PC/SC transport

use std::time::Duration;

use dnie_apdu_core::LengthWidth;
use pcsc::{Protocols as PcscProtocols, ShareMode as PcscShareMode};

/// How long to wait for a card to be presented by default
pub const DEFAULT_CARD_TIMEOUT: Duration = Duration::from_secs(120);

/// Sharing mode for card connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Exclusive access to the card
    Exclusive,
    /// Shared access to the card (default)
    Shared,
    /// Direct connection to the reader
    Direct,
}

impl From<ShareMode> for PcscShareMode {
    fn from(mode: ShareMode) -> Self {
        match mode {
            ShareMode::Exclusive => Self::Exclusive,
            ShareMode::Shared => Self::Shared,
            ShareMode::Direct => Self::Direct,
        }
    }
}

/// Configuration options for PC/SC transport
#[derive(Debug, Clone)]
pub struct PcscConfig {
    /// Sharing mode
    pub share_mode: ShareMode,

    /// Preferred protocols
    pub protocols: PcscProtocols,

    /// Automatically reconnect if the card is reset
    pub auto_reconnect: bool,

    /// Width of the `Lc`/`Le` fields sent to the card
    pub length_width: LengthWidth,

    /// Upper bound on waiting for a card to be inserted
    pub card_timeout: Duration,
}

impl Default for PcscConfig {
    fn default() -> Self {
        Self {
            share_mode: ShareMode::Shared,
            protocols: PcscProtocols::ANY,
            auto_reconnect: true,
            length_width: LengthWidth::Short,
            card_timeout: DEFAULT_CARD_TIMEOUT,
        }
    }
}

impl PcscConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sharing mode
    pub const fn with_share_mode(mut self, mode: ShareMode) -> Self {
        self.share_mode = mode;
        self
    }

    /// Set the preferred protocols
    pub const fn with_protocols(mut self, protocols: PcscProtocols) -> Self {
        self.protocols = protocols;
        self
    }

    /// Set whether to automatically reconnect
    pub const fn with_auto_reconnect(mut self, auto_reconnect: bool) -> Self {
        self.auto_reconnect = auto_reconnect;
        self
    }

    /// Set the width used for `Lc`/`Le` when serializing commands
    pub const fn with_length_width(mut self, width: LengthWidth) -> Self {
        self.length_width = width;
        self
    }

    /// Set how long to wait for a card before giving up
    pub const fn with_card_timeout(mut self, timeout: Duration) -> Self {
        self.card_timeout = timeout;
        self
    }
}
