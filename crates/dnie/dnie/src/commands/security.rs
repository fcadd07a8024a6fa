use bytes::Bytes;
use dnie_apdu_core::Command;

use crate::constants::{CLA, ins};

/// MSE SET for computation with the digital signature template (P1 `41`, P2 `B6`)
const MSE_SET_DST: (u8, u8) = (0x41, 0xB6);

/// CRT of the signature template:
/// `80 01 8A` algorithm reference (RSA, off-card hash, on-card PKCS#1 v1.5 padding),
/// `84 01 81` private key reference of the signature key
const SIGNATURE_TEMPLATE: &[u8] = &[0x80, 0x01, 0x8A, 0x84, 0x01, 0x81];

/// PSO: COMPUTE DIGITAL SIGNATURE (P1 `9E` digital signature, P2 `9A` data to sign)
const PSO_CDS: (u8, u8) = (0x9E, 0x9A);

/// MANAGE SECURITY ENVIRONMENT selecting the signature key and algorithm
pub fn set_signature_environment() -> Command {
    let (p1, p2) = MSE_SET_DST;
    Command::new_with_data(CLA, ins::MANAGE_SECURITY_ENVIRONMENT, p1, p2, SIGNATURE_TEMPLATE)
}

/// PERFORM SECURITY OPERATION signing a `DigestInfo` payload
pub fn compute_digital_signature(payload: Bytes) -> Command {
    let (p1, p2) = PSO_CDS;
    Command::new_with_data(CLA, ins::PERFORM_SECURITY_OPERATION, p1, p2, payload)
}
