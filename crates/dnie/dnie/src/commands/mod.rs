//! Builders for the APDU commands the DNIe protocols send
//!
//! Each builder returns a plain [`Command`](dnie_apdu_core::Command); the transport
//! decides the width of its length fields.

pub mod pin;
pub mod read;
pub mod security;
pub mod select;

pub use pin::verify_pin;
pub use read::read_certificate_chunk;
pub use security::{compute_digital_signature, set_signature_environment};
pub use select::{select_file, select_pki_application};
