//! Utility functions and types for the DNIe CLI

pub mod session;

use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

pub use session::{ConnectionArgs, open_session};

/// Prompt for the PIN on the terminal without echoing it
pub fn prompt_pin(prompt: &str) -> io::Result<String> {
    let pin = rpassword::prompt_password(format!("{prompt}: "))?;
    Ok(pin.trim_end_matches(['\r', '\n']).to_string())
}

/// Read the whole input file
pub fn read_input(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    fs::read(path).map_err(|e| format!("Could not read '{}': {}", path.display(), e).into())
}

/// Write bytes verbatim to `path`
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    fs::write(path, bytes).map_err(|e| format!("Could not write '{}': {}", path.display(), e).into())
}
