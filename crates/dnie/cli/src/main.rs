use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dnie::{CertificateType, HashAlgorithm};
use dnie_apdu_transport_pcsc::{DEFAULT_CARD_TIMEOUT, PcscDeviceManager};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod commands;
mod utils;

use commands::*;
use utils::ConnectionArgs;

#[derive(Parser)]
#[command(version, about = "Sign files and extract certificates with a Peruvian DNIe")]
struct Cli {
    /// Reader to wait on (any reader if not specified)
    #[arg(short, long, global = true)]
    reader: Option<String>,

    /// Seconds to wait for a DNIe to be presented
    #[arg(short, long, global = true, default_value_t = DEFAULT_CARD_TIMEOUT.as_secs())]
    timeout: u64,

    /// Send two-byte Lc/Le fields (legacy card revisions)
    #[arg(long, global = true)]
    extended_apdu: bool,

    /// Debug level output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Sign a file with the signature key
    Sign {
        /// File to sign
        input: PathBuf,

        /// Where to write the raw RSA signature
        output: PathBuf,

        /// Hash applied to the input before signing
        #[arg(long, value_enum, default_value_t = HashAlgorithm::Sha256)]
        hash_algorithm: HashAlgorithm,
    },

    /// Extract a certificate (DER) from the card
    Extract {
        /// Certificate to extract
        #[arg(value_enum)]
        certificate: CertificateType,

        /// Where to write the certificate
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    // Create a PC/SC device manager
    let manager = PcscDeviceManager::new()?;

    let connection = ConnectionArgs {
        reader: cli.reader,
        timeout: cli.timeout,
        extended_apdu: cli.extended_apdu,
    };

    match cli.command {
        Commands::List => list_command(&manager)?,
        Commands::Sign {
            input,
            output,
            hash_algorithm,
        } => sign_command(&manager, &connection, &input, &output, hash_algorithm)?,
        Commands::Extract {
            certificate,
            output,
        } => extract_command(&manager, &connection, certificate, &output)?,
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &directives))
        .with_ansi(true)
        .init();
}

/// INFO by default, DEBUG with `--verbose`; `RUST_LOG` directives are added on top
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sign_defaults_to_sha256() {
        let cli = Cli::try_parse_from(["dniectl", "sign", "in.txt", "out.sig"]).unwrap();
        assert_eq!(cli.timeout, 120);
        assert!(!cli.extended_apdu);
        match cli.command {
            Commands::Sign { hash_algorithm, .. } => {
                assert_eq!(hash_algorithm, HashAlgorithm::Sha256)
            }
            _ => panic!("expected sign"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dniectl",
            "extract",
            "signature",
            "cert.der",
            "--reader",
            "ACS ACR39U",
            "--timeout",
            "30",
            "--extended-apdu",
        ])
        .unwrap();

        assert_eq!(cli.reader.as_deref(), Some("ACS ACR39U"));
        assert_eq!(cli.timeout, 30);
        assert!(cli.extended_apdu);
        assert!(matches!(
            cli.command,
            Commands::Extract {
                certificate: CertificateType::Signature,
                ..
            }
        ));
    }

    #[test]
    fn test_log_level_follows_verbose_flag() {
        assert_eq!(log_filter(false, "").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, "").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(false, "dnie=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_unknown_hash_algorithm_rejected() {
        let result = Cli::try_parse_from([
            "dniectl",
            "sign",
            "in.txt",
            "out.sig",
            "--hash-algorithm",
            "md5",
        ]);
        assert!(result.is_err());
    }
}
