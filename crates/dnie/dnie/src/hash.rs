//! Message digests and the DER `DigestInfo` prefix of RSASSA-PKCS1-v1_5 (RFC 3447 §9.2)
//!
//! The DNIe pads on-card, so the payload handed to PSO: COMPUTE DIGITAL SIGNATURE is
//! only `DigestInfo` (algorithm identifier prefix followed by the raw digest).

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use derive_more::Display;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::{Error, Result};

const SHA224_PREFIX: &[u8] = &[
    0x30, 0x2D, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04, 0x05,
    0x00, 0x04, 0x1C,
];
const SHA256_PREFIX: &[u8] = &[
    0x30, 0x31, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];
const SHA384_PREFIX: &[u8] = &[
    0x30, 0x41, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02, 0x05,
    0x00, 0x04, 0x30,
];
const SHA512_PREFIX: &[u8] = &[
    0x30, 0x51, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03, 0x05,
    0x00, 0x04, 0x40,
];

/// Hash algorithms the card accepts a `DigestInfo` for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HashAlgorithm {
    /// SHA-224
    #[display("sha224")]
    Sha224,
    /// SHA-256
    #[default]
    #[display("sha256")]
    Sha256,
    /// SHA-384
    #[display("sha384")]
    Sha384,
    /// SHA-512
    #[display("sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms
    pub const ALL: [Self; 4] = [Self::Sha224, Self::Sha256, Self::Sha384, Self::Sha512];

    /// Hash `input`
    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha224 => Sha224::digest(input).to_vec(),
            Self::Sha256 => Sha256::digest(input).to_vec(),
            Self::Sha384 => Sha384::digest(input).to_vec(),
            Self::Sha512 => Sha512::digest(input).to_vec(),
        }
    }

    /// Digest length in bytes
    pub const fn digest_size(&self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// DER encoding of the `DigestInfo` header up to the digest octet string contents
    pub const fn digest_info_prefix(&self) -> &'static [u8] {
        match self {
            Self::Sha224 => SHA224_PREFIX,
            Self::Sha256 => SHA256_PREFIX,
            Self::Sha384 => SHA384_PREFIX,
            Self::Sha512 => SHA512_PREFIX,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

/// Look up the `DigestInfo` prefix by algorithm name
pub fn digest_info_prefix(name: &str) -> Result<&'static [u8]> {
    name.parse::<HashAlgorithm>()
        .map(|algorithm| algorithm.digest_info_prefix())
}

/// Build the bytes the card signs: `DigestInfo` prefix followed by the digest of `input`
///
/// No PKCS#1 padding is added; the card pads itself.
pub fn build_signature_payload(input: &[u8], algorithm: HashAlgorithm) -> Bytes {
    let prefix = algorithm.digest_info_prefix();
    let mut payload = BytesMut::with_capacity(prefix.len() + algorithm.digest_size());
    payload.put_slice(prefix);
    payload.put_slice(&algorithm.digest(input));
    payload.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &[u8] = b"some data here";

    #[test]
    fn test_digest_vectors() {
        let vectors = [
            (
                HashAlgorithm::Sha224,
                "846c7f63c49db3a57d3f4eec0e3241eb3fa3f9d730de2d4198d0e801",
            ),
            (
                HashAlgorithm::Sha256,
                "679aa02ff1852e40618b0701f430cad8bfcaa0811579edb17a258c2b322b9826",
            ),
            (
                HashAlgorithm::Sha384,
                "82f2d988f9e7acaf5def7a297b159247998e69a7e720bb7a4a1fb77d080731530d97cec50c003e929d72cd1c76baa52c",
            ),
            (
                HashAlgorithm::Sha512,
                "c0b2a5f4e22cf4f23233ac51a47f522aa92ef49647be72eaa8e287fe663707678173c8038c2b3e3a1d870f8ae21b807a9d4917cb5247de10105984f441baf518",
            ),
        ];

        for (algorithm, expected) in vectors {
            let digest = algorithm.digest(INPUT);
            assert_eq!(hex::encode(&digest), expected, "{algorithm}");
            assert_eq!(digest.len(), algorithm.digest_size());
        }
    }

    #[test]
    fn test_digest_info_prefix_table() {
        assert_eq!(
            hex::encode(digest_info_prefix("sha224").unwrap()),
            "302d300d06096086480165030402040500041c"
        );
        assert_eq!(
            hex::encode(digest_info_prefix("sha256").unwrap()),
            "3031300d060960864801650304020105000420"
        );
        assert_eq!(
            hex::encode(digest_info_prefix("sha384").unwrap()),
            "3041300d060960864801650304020205000430"
        );
        assert_eq!(
            hex::encode(digest_info_prefix("sha512").unwrap()),
            "3051300d060960864801650304020305000440"
        );
    }

    #[test]
    fn test_prefix_ends_with_digest_length() {
        for algorithm in HashAlgorithm::ALL {
            let prefix = algorithm.digest_info_prefix();
            assert_eq!(prefix[prefix.len() - 1] as usize, algorithm.digest_size());
            assert_eq!(prefix[1] as usize, prefix.len() - 2 + algorithm.digest_size());
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        for name in ["md5", "sha1", "SHA256", "sha-256", ""] {
            assert!(matches!(
                digest_info_prefix(name),
                Err(Error::UnsupportedAlgorithm(ref n)) if n == name
            ));
        }
    }

    #[test]
    fn test_name_round_trip() {
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<HashAlgorithm>().unwrap(), algorithm);
        }
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
    }

    #[test]
    fn test_build_signature_payload() {
        let payload = build_signature_payload(b"some information to sign", HashAlgorithm::Sha256);
        assert_eq!(
            hex::encode(&payload),
            "3031300d060960864801650304020105000420\
             0a409cc96995251f8ed39b45d1eabd159355a03f2f6784fe945d1c824804a8f3"
        );
        assert_eq!(payload.len(), 19 + 32);
    }
}
