//! Error types for PC/SC transport

use std::fmt;

use dnie_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    NoReadersAvailable,

    /// Reader not found
    ReaderNotFound(String),

    /// No card present in reader
    NoCard(String),

    /// No matching card was presented before the deadline
    Timeout,

    /// Card was reset
    CardReset,

    /// Card was removed
    CardRemoved,
}

impl fmt::Display for PcscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pcsc(e) => write!(f, "PC/SC error: {}", e),
            Self::NoReadersAvailable => write!(f, "No readers available"),
            Self::ReaderNotFound(r) => write!(f, "Reader not found: {}", r),
            Self::NoCard(r) => write!(f, "No card present in reader: {}", r),
            Self::Timeout => write!(f, "Timed out waiting for a card"),
            Self::CardReset => write!(f, "Card was reset"),
            Self::CardRemoved => write!(f, "Card was removed"),
        }
    }
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(pcsc::Error::NoSmartcard)
            | PcscError::Pcsc(pcsc::Error::RemovedCard)
            | PcscError::Pcsc(pcsc::Error::ResetCard)
            | PcscError::NoCard(_)
            | PcscError::CardRemoved
            | PcscError::CardReset => Self::Connection,
            PcscError::Pcsc(pcsc::Error::Timeout) | PcscError::Timeout => Self::Timeout,
            PcscError::Pcsc(pcsc::Error::InsufficientBuffer) => Self::BufferTooSmall,
            PcscError::Pcsc(e) => Self::Driver(e as i32),
            PcscError::NoReadersAvailable | PcscError::ReaderNotFound(_) => Self::Device,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_mapping() {
        assert_eq!(
            TransportError::from(PcscError::CardRemoved),
            TransportError::Connection
        );
        assert_eq!(
            TransportError::from(PcscError::Pcsc(pcsc::Error::Timeout)),
            TransportError::Timeout
        );
        assert_eq!(
            TransportError::from(PcscError::ReaderNotFound("ACS".into())),
            TransportError::Device
        );
        assert_eq!(
            TransportError::from(PcscError::Pcsc(pcsc::Error::InsufficientBuffer)),
            TransportError::BufferTooSmall
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PcscError::NoCard("ACS ACR39U".into()).to_string(),
            "No card present in reader: ACS ACR39U"
        );
        assert_eq!(PcscError::Timeout.to_string(), "Timed out waiting for a card");
    }
}
