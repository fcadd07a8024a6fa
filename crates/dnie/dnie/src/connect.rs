//! Waiting for a DNIe and connecting to it over PC/SC

use dnie_apdu_transport_pcsc::{AtrPattern, PcscConfig, PcscDeviceManager, PcscError, PcscTransport};
use tracing::{info, warn};

use crate::constants::DNIE_ATR_PATTERNS;
use crate::{Error, Result};

/// Check whether an ATR belongs to a DNIe v2 (contact or contactless)
pub fn is_dnie_atr(atr: &[u8]) -> bool {
    AtrPattern::any_matches(&DNIE_ATR_PATTERNS, atr)
}

/// Wait up to `config.card_timeout` for a DNIe and open a transport to it
///
/// Only `reader` is watched when given. The ATR is checked again once connected,
/// in case the card was swapped in between.
pub fn connect(
    manager: &PcscDeviceManager,
    reader: Option<&str>,
    config: PcscConfig,
) -> Result<PcscTransport> {
    let found = manager
        .wait_for_card(&DNIE_ATR_PATTERNS, reader, config.card_timeout)
        .map_err(|e| match e {
            PcscError::Timeout => Error::CardNotFound,
            e => e.into(),
        })?;

    let transport = manager.open_reader_with_config(found.name(), config)?;
    let atr = transport.atr()?;
    if !is_dnie_atr(&atr) {
        warn!(reader = %found.name(), "Card in reader is no longer a DNIe");
        return Err(Error::CardNotFound);
    }

    info!(reader = %found.name(), "Connected to DNIe");
    Ok(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DNIE_V2_ATR, DNIE_V2_ATR_NFC};

    #[test]
    fn test_contact_atr() {
        assert!(is_dnie_atr(DNIE_V2_ATR));
        assert!(!is_dnie_atr(&DNIE_V2_ATR[..DNIE_V2_ATR.len() - 1]));

        let mut other = DNIE_V2_ATR.to_vec();
        other[1] = 0xDD;
        assert!(!is_dnie_atr(&other));
    }

    #[test]
    fn test_contactless_atr() {
        assert!(is_dnie_atr(DNIE_V2_ATR_NFC));
        assert!(!is_dnie_atr(&[0x3B, 0x80, 0x80, 0x01]));

        let mut longer = DNIE_V2_ATR_NFC.to_vec();
        longer.extend_from_slice(&[0x80, 0x01]);
        assert!(!is_dnie_atr(&longer));
    }

    #[test]
    fn test_other_cards_rejected() {
        // Yubikey 5 NFC
        assert!(!is_dnie_atr(&[
            0x3B, 0xFD, 0x13, 0x00, 0x00, 0x81, 0x31, 0xFE, 0x15, 0x80, 0x73, 0xC0, 0x21, 0xC0,
            0x57, 0x59, 0x75, 0x62, 0x69, 0x4B, 0x65, 0x79, 0x40
        ]));
        assert!(!is_dnie_atr(&[]));
    }
}
