//! Peruvian DNIe v2 smart card support
//!
//! Extracts the signature certificate and produces RSA PKCS#1 v1.5 signatures with
//! the card's signature key, over any [`CardTransport`](dnie_apdu_core::CardTransport).
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dnie::{Dnie, HashAlgorithm};
//! use dnie_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager};
//!
//! let manager = PcscDeviceManager::new()?;
//! let transport = dnie::connect(&manager, None, PcscConfig::default())?;
//!
//! let mut session = Dnie::builder()
//!     .transport(transport)
//!     .hash_algorithm(HashAlgorithm::Sha256)
//!     .pin_provider(Box::new(|_prompt: &str| Ok("123456".to_string())))
//!     .build()?;
//!
//! let signature = session.sign_bytes(b"some information to sign")?;
//! assert_eq!(signature.len(), dnie::MODULUS_SIZE);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod certificate;
pub mod commands;
mod connect;
mod constants;
mod error;
mod hash;
mod session;
mod signing;
mod types;

pub use connect::{connect, is_dnie_atr};
pub use constants::*;
pub use error::{Error, ProtocolStep, Result};
pub use hash::{HashAlgorithm, build_signature_payload, digest_info_prefix};
pub use session::{Dnie, DnieBuilder, InputRequestFn, ProgressFn};
pub use types::{CertificateType, PinReference, Progress};
