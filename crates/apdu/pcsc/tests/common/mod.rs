//! Common test utilities

use dnie_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager, PcscReader, PcscTransport};

/// Try to get a PC/SC device manager, `None` when no PC/SC service is running
pub fn get_manager() -> Option<PcscDeviceManager> {
    PcscDeviceManager::new().ok()
}

/// Try to find a reader with a card inserted
pub fn get_reader_with_card(manager: &PcscDeviceManager) -> Option<PcscReader> {
    manager
        .list_readers()
        .ok()?
        .into_iter()
        .find(PcscReader::has_card)
}

/// Try to get a real transport for tests
pub fn get_test_transport() -> Option<PcscTransport> {
    let manager = get_manager()?;
    let reader = get_reader_with_card(&manager)?;

    manager
        .open_reader_with_config(reader.name(), PcscConfig::default())
        .ok()
}
