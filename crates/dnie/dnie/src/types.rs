//! Value types shared by the card protocols

use derive_more::Display;

/// Certificates stored on the DNIe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CertificateType {
    /// Non-repudiation (digital signature) certificate
    #[display("signature")]
    Signature,
    /// Authentication certificate
    #[display("authentication")]
    Authentication,
    /// Encryption certificate
    #[display("encryption")]
    Encryption,
}

impl CertificateType {
    /// File identifier of the certificate inside the PKI application
    pub const fn file_id(&self) -> [u8; 2] {
        match self {
            Self::Signature => [0x00, 0x1D],
            Self::Authentication => [0x00, 0x1C],
            Self::Encryption => [0x00, 0x1B],
        }
    }
}

/// PIN references, sent as P2 of VERIFY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinReference {
    /// PIN guarding the signature key
    Signature = 0x81,
    /// PIN guarding the encryption key
    Encryption = 0x83,
}

impl PinReference {
    /// P2 value of the VERIFY command
    pub const fn p2(self) -> u8 {
        self as u8
    }
}

/// Milestones reported while a protocol runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Progress {
    /// Selecting the PKI application
    #[display("Selecting PKI application")]
    SelectingPkiApplication,
    /// Selecting a certificate file
    #[display("Selecting {_0} certificate")]
    SelectingCertificate(CertificateType),
    /// About to read the chunk at `offset`
    #[display("Reading certificate at offset {offset:#06x} ({bytes_read} bytes so far)")]
    ReadingCertificate {
        /// Offset of the chunk being requested
        offset: u16,
        /// Certificate bytes collected so far
        bytes_read: usize,
    },
    /// The whole certificate was read
    #[display("Certificate read ({len} bytes)")]
    CertificateRead {
        /// Certificate length
        len: usize,
    },
    /// Verifying the PIN
    #[display("Verifying PIN")]
    VerifyingPin,
    /// Setting the security environment
    #[display("Setting security environment")]
    SettingSecurityEnvironment,
    /// Asking the card to sign
    #[display("Computing signature")]
    ComputingSignature,
    /// The card returned a signature
    #[display("Signature computed ({len} bytes)")]
    SignatureComputed {
        /// Signature length
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_file_ids() {
        assert_eq!(CertificateType::Signature.file_id(), [0x00, 0x1D]);
        assert_eq!(CertificateType::Authentication.file_id(), [0x00, 0x1C]);
        assert_eq!(CertificateType::Encryption.file_id(), [0x00, 0x1B]);
        assert_eq!(CertificateType::Authentication.to_string(), "authentication");
    }

    #[test]
    fn test_pin_reference() {
        assert_eq!(PinReference::Signature.p2(), 0x81);
        assert_eq!(PinReference::Encryption.p2(), 0x83);
    }

    #[test]
    fn test_progress_display() {
        let progress = Progress::ReadingCertificate {
            offset: 0xE4,
            bytes_read: 225,
        };
        assert_eq!(
            progress.to_string(),
            "Reading certificate at offset 0x00e4 (225 bytes so far)"
        );
        assert_eq!(
            Progress::SelectingCertificate(CertificateType::Signature).to_string(),
            "Selecting signature certificate"
        );
    }
}
