//! PC/SC transport implementation for APDU operations
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `dnie-apdu-core` using the PC/SC API for communication with smart cards,
//! together with reader discovery and a bounded wait for a card whose ATR
//! matches a known pattern.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//!
//! use dnie_apdu_core::{CardTransport, Command};
//! use dnie_apdu_transport_pcsc::{AtrPattern, PcscConfig, PcscDeviceManager};
//!
//! let manager = PcscDeviceManager::new()?;
//!
//! let reader = manager.wait_for_card(
//!     &[AtrPattern::Prefix(&[0x3B])],
//!     None,
//!     Duration::from_secs(30),
//! )?;
//! println!("Connecting to reader: {}", reader.name());
//!
//! let mut transport = manager.open_reader_with_config(reader.name(), PcscConfig::default())?;
//!
//! let aid = hex::decode("A000000003000000")?;
//! let response = transport.transmit(&Command::new_with_data(0x00, 0xA4, 0x04, 0x00, aid))?;
//! println!("Status: {}", response.status());
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;
mod util;

pub use config::{DEFAULT_CARD_TIMEOUT, PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;
pub use util::{AtrPattern, match_atr};

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};
