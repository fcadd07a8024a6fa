use dnie_apdu_core::Command;

use crate::constants::{CLA, PKI_AID, ins};

/// SELECT by DF name, first or only occurrence
const P1_BY_NAME: u8 = 0x04;
/// SELECT by file identifier under the current DF
const P1_BY_FILE_ID: u8 = 0x02;
/// Return no FCI
const P2_NO_FCI: u8 = 0x04;

/// SELECT the PKI application by AID
pub fn select_pki_application() -> Command {
    Command::new_with_data(CLA, ins::SELECT, P1_BY_NAME, 0x00, PKI_AID)
}

/// SELECT an elementary file by its two-byte identifier
pub fn select_file(file_id: [u8; 2]) -> Command {
    Command::new_with_data(CLA, ins::SELECT, P1_BY_FILE_ID, P2_NO_FCI, file_id.to_vec())
}
