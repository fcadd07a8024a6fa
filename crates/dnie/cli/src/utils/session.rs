use std::time::Duration;

use dnie::{Dnie, HashAlgorithm, Progress};
use dnie_apdu_core::LengthWidth;
use dnie_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager, PcscTransport};
use tracing::info;

use super::prompt_pin;

/// How to reach the card
#[derive(Debug, Clone)]
pub struct ConnectionArgs {
    /// Reader to watch, any reader when `None`
    pub reader: Option<String>,
    /// Seconds to wait for the card
    pub timeout: u64,
    /// Use two-byte length fields
    pub extended_apdu: bool,
}

impl ConnectionArgs {
    /// Transport configuration for these arguments
    pub fn pcsc_config(&self) -> PcscConfig {
        let width = if self.extended_apdu {
            LengthWidth::Extended
        } else {
            LengthWidth::Short
        };

        PcscConfig::default()
            .with_length_width(width)
            .with_card_timeout(Duration::from_secs(self.timeout))
    }
}

/// Wait for a DNIe and open a session on it
pub fn open_session(
    manager: &PcscDeviceManager,
    connection: &ConnectionArgs,
    hash_algorithm: Option<HashAlgorithm>,
) -> Result<Dnie<PcscTransport>, dnie::Error> {
    info!(
        "Insert your DNIe (waiting up to {} seconds)",
        connection.timeout
    );
    let transport = dnie::connect(
        manager,
        connection.reader.as_deref(),
        connection.pcsc_config(),
    )?;

    let mut builder = Dnie::builder()
        .transport(transport)
        .pin_provider(Box::new(prompt_pin))
        .progress(Box::new(|progress: Progress| info!("{}", progress)));

    if let Some(algorithm) = hash_algorithm {
        builder = builder.hash_algorithm(algorithm);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcsc_config_from_args() {
        let args = ConnectionArgs {
            reader: None,
            timeout: 5,
            extended_apdu: true,
        };
        let config = args.pcsc_config();
        assert_eq!(config.length_width, LengthWidth::Extended);
        assert_eq!(config.card_timeout, Duration::from_secs(5));

        let args = ConnectionArgs {
            extended_apdu: false,
            ..args
        };
        assert_eq!(args.pcsc_config().length_width, LengthWidth::Short);
    }
}
