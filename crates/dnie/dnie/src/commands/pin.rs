use dnie_apdu_core::Command;

use crate::constants::{CLA, ins};
use crate::types::PinReference;
use crate::{Error, Result};

/// Check that a PIN can be sent as-is to the card
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.is_empty() {
        return Err(Error::Validation("PIN must not be empty".to_string()));
    }
    if !pin.is_ascii() {
        return Err(Error::Validation("PIN must be ASCII".to_string()));
    }
    Ok(())
}

/// VERIFY the PIN for `reference`, the PIN travels as its ASCII bytes
pub fn verify_pin(reference: PinReference, pin: &str) -> Result<Command> {
    validate_pin(pin)?;
    Ok(Command::new_with_data(
        CLA,
        ins::VERIFY,
        0x00,
        reference.p2(),
        pin.as_bytes().to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use dnie_apdu_core::LengthWidth;

    use super::*;

    #[test]
    fn test_verify_signature_pin() {
        let command = verify_pin(PinReference::Signature, "123456").unwrap();
        assert_eq!(
            hex::encode(command.to_bytes(LengthWidth::Short).unwrap()),
            "0020008106313233343536"
        );
    }

    #[test]
    fn test_invalid_pins() {
        assert!(matches!(
            verify_pin(PinReference::Signature, ""),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            verify_pin(PinReference::Signature, "12345ñ"),
            Err(Error::Validation(_))
        ));
    }
}
