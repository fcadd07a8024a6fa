//! Certificate extraction
//!
//! The certificate file is read in TLV framed chunks. Each READ names its offset
//! explicitly; the card answers `62 82` once the end of the file has been reached.

use dnie_apdu_core::CardTransport;
use tracing::{debug, info, trace};

use crate::commands;
use crate::constants::chunk;
use crate::error::ProtocolStep;
use crate::session::{Dnie, ensure_success, protocol_failure};
use crate::types::{CertificateType, Progress};
use crate::{Error, Result};

impl<T: CardTransport> Dnie<T> {
    /// Read a certificate off the card
    ///
    /// Only [`CertificateType::Signature`] is supported; other types fail with
    /// [`Error::UnsupportedCertificate`] without touching the card.
    pub fn extract_certificate(&mut self, certificate: CertificateType) -> Result<Vec<u8>> {
        match certificate {
            CertificateType::Signature => self.extract_signature_certificate(),
            other => Err(Error::UnsupportedCertificate(other)),
        }
    }

    /// Read the DER encoded signature certificate
    pub fn extract_signature_certificate(&mut self) -> Result<Vec<u8>> {
        let certificate = CertificateType::Signature;

        self.select_pki_application()?;

        self.report(Progress::SelectingCertificate(certificate));
        let response = self.transmit(&commands::select_file(certificate.file_id()))?;
        ensure_success(&response, ProtocolStep::SelectCertificate)?;

        let mut output = Vec::new();
        let mut offset: u16 = 0;

        loop {
            self.report(Progress::ReadingCertificate {
                offset,
                bytes_read: output.len(),
            });

            let response = self.transmit(&commands::read_certificate_chunk(offset))?;
            let status = response.status();

            if status.is_end_of_file() {
                if let Some(tail) = response.payload() {
                    output.extend_from_slice(chunk_body(tail));
                }
                debug!(offset, "End of certificate file reached");
                break;
            }

            if !status.is_success() {
                return Err(protocol_failure(ProtocolStep::Read, status));
            }

            let Some(data) = response.payload().filter(|data| data.first() == Some(&chunk::TAG))
            else {
                debug!(payload = ?response.payload(), "Chunk is not a 0x53 data object");
                return Err(protocol_failure(ProtocolStep::Read, status));
            };

            trace!(offset, len = data.len(), "Read certificate chunk");
            output.extend_from_slice(chunk_body(data));

            offset = offset
                .checked_add(chunk::STEP)
                .ok_or_else(|| protocol_failure(ProtocolStep::Read, status))?;
        }

        info!(len = output.len(), "Certificate successfully loaded");
        self.report(Progress::CertificateRead { len: output.len() });

        Ok(output)
    }
}

/// Chunk contents after the TLV header
fn chunk_body(data: &[u8]) -> &[u8] {
    data.get(chunk::HEADER_LEN..).unwrap_or_default()
}
