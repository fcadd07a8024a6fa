//! Subcommand implementations

use std::error::Error;
use std::path::Path;

use colored::Colorize;
use dnie::{CertificateType, HashAlgorithm};
use dnie_apdu_transport_pcsc::{PcscDeviceManager, PcscError};
use tracing::debug;

use crate::utils::{ConnectionArgs, open_session, read_input, write_output};

/// List all available readers
pub fn list_command(manager: &PcscDeviceManager) -> Result<(), Box<dyn Error>> {
    let readers = match manager.list_readers() {
        Ok(readers) => readers,
        Err(PcscError::NoReadersAvailable) => {
            println!("No readers found!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        let marker = match reader.atr() {
            Some(atr) if dnie::is_dnie_atr(atr) => " DNIe".green().to_string(),
            _ => String::new(),
        };
        println!("{}. {}{}", i + 1, reader, marker);
    }

    Ok(())
}

/// Sign `input` and write the raw signature to `output`
pub fn sign_command(
    manager: &PcscDeviceManager,
    connection: &ConnectionArgs,
    input: &Path,
    output: &Path,
    hash_algorithm: HashAlgorithm,
) -> Result<(), Box<dyn Error>> {
    // Fail on unreadable input before asking for the card
    let data = read_input(input)?;

    let mut session = open_session(manager, connection, Some(hash_algorithm))?;
    let signature = session.sign_bytes(&data)?;
    drop(session);

    debug!(signature = %hex::encode(&signature));
    write_output(output, &signature)?;

    println!(
        "{}",
        format!("Wrote signature to '{}'", output.display()).green()
    );
    Ok(())
}

/// Extract a certificate and write it to `output`
pub fn extract_command(
    manager: &PcscDeviceManager,
    connection: &ConnectionArgs,
    certificate: CertificateType,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    if certificate != CertificateType::Signature {
        return Err(dnie::Error::UnsupportedCertificate(certificate).into());
    }

    let mut session = open_session(manager, connection, None)?;
    let bytes = session.extract_certificate(certificate)?;
    drop(session);

    write_output(output, &bytes)?;

    println!(
        "{}",
        format!("Wrote certificate to '{}'", output.display()).green()
    );
    Ok(())
}
