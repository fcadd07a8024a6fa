//! RSA signing with the signature key

use dnie_apdu_core::CardTransport;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::commands;
use crate::constants::MODULUS_SIZE;
use crate::error::ProtocolStep;
use crate::hash::build_signature_payload;
use crate::session::{Dnie, ensure_success, protocol_failure};
use crate::types::{PinReference, Progress};
use crate::{Error, Result};

impl<T: CardTransport> Dnie<T> {
    /// Sign `input` with the signature key
    ///
    /// `input` is hashed with the session's hash algorithm and wrapped in a
    /// `DigestInfo`; the card pads and signs it. Returns the raw RSA signature.
    pub fn sign_bytes(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let algorithm = self
            .hash_algorithm()
            .ok_or(Error::Configuration("a hash algorithm is required for signing"))?;
        let payload = build_signature_payload(input, algorithm);
        debug!(%algorithm, len = payload.len(), "Built DigestInfo payload");

        self.select_pki_application()?;
        self.verify_pin(PinReference::Signature)?;

        self.report(Progress::SettingSecurityEnvironment);
        let response = self.transmit(&commands::set_signature_environment())?;
        ensure_success(&response, ProtocolStep::SetSecurityEnvironment)?;

        self.report(Progress::ComputingSignature);
        let response = self.transmit(&commands::compute_digital_signature(payload))?;
        ensure_success(&response, ProtocolStep::Sign)?;

        let status = response.status();
        let signature = response
            .into_payload()
            .ok_or_else(|| protocol_failure(ProtocolStep::Sign, status))?;

        if signature.len() != MODULUS_SIZE {
            warn!(
                len = signature.len(),
                expected = MODULUS_SIZE,
                "Signature length differs from the key modulus size"
            );
        }

        info!(len = signature.len(), "Signature computed");
        self.report(Progress::SignatureComputed {
            len: signature.len(),
        });

        Ok(signature.to_vec())
    }

    /// Ask for the PIN and VERIFY it against `reference`
    pub fn verify_pin(&mut self, reference: PinReference) -> Result<()> {
        let pin = Zeroizing::new(self.request_pin()?);
        let command = commands::verify_pin(reference, &pin)?;

        self.report(Progress::VerifyingPin);
        let response = self.transmit(&command)?;
        let status = response.status();

        if status.is_success() {
            debug!("PIN verified");
            return Ok(());
        }

        if let Some(retries) = status.retries_left() {
            warn!(retries, "PIN rejected");
        } else if status.is_authentication_blocked() {
            warn!("PIN is blocked");
        } else {
            warn!(%status, "{}", status.description());
        }

        Err(Error::Authentication { status })
    }
}
