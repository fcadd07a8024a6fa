use dnie_apdu_core::{StatusWord, TransportError};
use dnie_apdu_transport_pcsc::PcscError;

use crate::types::CertificateType;

/// Result type for DNIe operations
pub type Result<T> = std::result::Result<T, Error>;

/// The step of a card protocol that the card refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProtocolStep {
    /// SELECT of the PKI application
    #[display("select-pki-failed")]
    SelectPki,
    /// SELECT of a certificate file
    #[display("select-cert-failed")]
    SelectCertificate,
    /// A certificate chunk read
    #[display("read-failed")]
    Read,
    /// MANAGE SECURITY ENVIRONMENT before signing
    #[display("set-security-env-failed")]
    SetSecurityEnvironment,
    /// PSO: COMPUTE DIGITAL SIGNATURE
    #[display("sign-failed")]
    Sign,
}

/// Error type for DNIe operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before anything was sent to the card
    #[error("Validation error: {0}")]
    Validation(String),

    /// The reader or card connection failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The card answered a protocol step with an unexpected status or payload
    #[error("{step}: card answered {status} ({})", .status.description())]
    Protocol {
        /// Step that failed
        step: ProtocolStep,
        /// Status word of the offending response
        status: StatusWord,
    },

    /// The card rejected the PIN
    #[error("PIN verification failed: card answered {status} ({})", .status.description())]
    Authentication {
        /// Status word returned by VERIFY
        status: StatusWord,
    },

    /// The PIN provider could not supply a PIN
    #[error("Could not read the PIN: {0}")]
    PinUnavailable(#[source] std::io::Error),

    /// No DNIe was presented before the timeout elapsed
    #[error("No DNIe card found")]
    CardNotFound,

    /// Unknown hash algorithm name
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Only the signature certificate can be extracted
    #[error("Extraction of the {0} certificate is not supported")]
    UnsupportedCertificate(CertificateType),

    /// The session is missing something the operation needs
    #[error("Configuration error: {0}")]
    Configuration(&'static str),

    /// PC/SC errors
    #[error(transparent)]
    Pcsc(#[from] PcscError),
}

impl Error {
    /// Create a protocol error for a step
    pub const fn protocol(step: ProtocolStep, status: StatusWord) -> Self {
        Self::Protocol { step, status }
    }

    /// Status word carried by the error, if any
    pub const fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Protocol { status, .. } | Self::Authentication { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<dnie_apdu_core::Error> for Error {
    fn from(error: dnie_apdu_core::Error) -> Self {
        match error {
            dnie_apdu_core::Error::Validation(message) => Self::Validation(message.to_string()),
            dnie_apdu_core::Error::Transport(e) => Self::Transport(e),
            dnie_apdu_core::Error::Parse(message) => {
                Self::Transport(TransportError::other(format!("malformed response: {message}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_step_ids() {
        assert_eq!(ProtocolStep::SelectPki.to_string(), "select-pki-failed");
        assert_eq!(ProtocolStep::SelectCertificate.to_string(), "select-cert-failed");
        assert_eq!(ProtocolStep::Read.to_string(), "read-failed");
        assert_eq!(
            ProtocolStep::SetSecurityEnvironment.to_string(),
            "set-security-env-failed"
        );
        assert_eq!(ProtocolStep::Sign.to_string(), "sign-failed");
    }

    #[test]
    fn test_protocol_error_message() {
        let error = Error::protocol(ProtocolStep::Read, StatusWord::new(0x6A, 0x82));
        assert_eq!(error.to_string(), "read-failed: card answered 6A 82 (File not found)");
        assert_eq!(error.status(), Some(StatusWord::new(0x6A, 0x82)));
    }

    #[test]
    fn test_apdu_error_conversion() {
        let error = Error::from(dnie_apdu_core::Error::validation("Lc exceeds length width"));
        assert!(matches!(error, Error::Validation(ref m) if m == "Lc exceeds length width"));

        let error = Error::from(dnie_apdu_core::Error::parse("too short"));
        assert!(matches!(error, Error::Transport(TransportError::Other(_))));
        assert_eq!(error.status(), None);
    }
}
