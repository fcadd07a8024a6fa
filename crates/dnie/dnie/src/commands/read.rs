use dnie_apdu_core::Command;

use crate::constants::{CLA, chunk, ins};

/// READ BINARY (odd instruction) of the chunk starting at `offset` in the selected file
///
/// The offset travels big-endian inside an offset data object: `54 02 hi lo`.
pub fn read_certificate_chunk(offset: u16) -> Command {
    let [hi, lo] = offset.to_be_bytes();
    Command::new_with_data_and_le(
        CLA,
        ins::READ_BINARY_ODD,
        0x00,
        0x00,
        vec![chunk::OFFSET_TAG, 0x02, hi, lo],
        chunk::LE,
    )
}
