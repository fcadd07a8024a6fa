//! Reader representation for PC/SC devices

use std::fmt;

use pcsc::{ReaderState, State};

/// Representation of a PC/SC card reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcscReader {
    /// Name of the reader
    name: String,

    /// Whether a card is present
    has_card: bool,

    /// Answer To Reset of the card (if present)
    atr: Option<Vec<u8>>,
}

impl PcscReader {
    /// Create a new reader
    pub const fn new(name: String, has_card: bool, atr: Option<Vec<u8>>) -> Self {
        Self {
            name,
            has_card,
            atr,
        }
    }

    /// Create a reader from a reader state
    pub(crate) fn from_reader_state(reader_state: &ReaderState) -> Self {
        let has_card = reader_state.event_state().contains(State::PRESENT)
            && !reader_state.event_state().contains(State::EMPTY);

        let atr = has_card.then(|| reader_state.atr().to_vec());

        Self {
            name: reader_state.name().to_string_lossy().into_owned(),
            has_card,
            atr,
        }
    }

    /// Get the reader name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a card is present in the reader
    pub const fn has_card(&self) -> bool {
        self.has_card
    }

    /// Get the ATR of the card if present
    pub fn atr(&self) -> Option<&[u8]> {
        self.atr.as_deref()
    }
}

impl fmt::Display for PcscReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.atr {
            Some(atr) => write!(f, "{} [card: {}]", self.name, hex::encode_upper(atr)),
            None if self.has_card => write!(f, "{} [card]", self.name),
            None => write!(f, "{} [empty]", self.name),
        }
    }
}
