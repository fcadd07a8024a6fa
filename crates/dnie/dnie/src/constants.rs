use dnie_apdu_transport_pcsc::AtrPattern;

/// Class byte used by every DNIe command
pub const CLA: u8 = 0x00;

/// AID of the PKI application: RID `E8 28 BD 08 0F`, PIX `D2` "PGeneric"
pub const PKI_AID: &[u8] = b"\xE8\x28\xBD\x08\x0F\xD2\x50\x47\x65\x6E\x65\x72\x69\x63";

/// RSA modulus size of the on-card keys, in bytes
pub const MODULUS_SIZE: usize = 256;

/// ATR of the DNIe v2 when read through a contact reader
pub const DNIE_V2_ATR: &[u8] = &[
    0x3B, 0xDC, 0x18, 0xFF, 0x81, 0x91, 0xFE, 0x1F, 0xC3, 0x80, 0x73, 0xC8, 0x21, 0x13, 0x66,
    0x05, 0x03, 0x63, 0x51, 0x00, 0x02, 0x50,
];

/// ATR of the DNIe v2 when read through a contactless reader
pub const DNIE_V2_ATR_NFC: &[u8] = &[0x3B, 0x80, 0x80, 0x01, 0x01];

/// ATRs accepted as a DNIe v2
pub const DNIE_ATR_PATTERNS: [AtrPattern; 2] = [
    AtrPattern::Exact(DNIE_V2_ATR),
    AtrPattern::Exact(DNIE_V2_ATR_NFC),
];

/// Instruction bytes
pub mod ins {
    /// SELECT
    pub const SELECT: u8 = 0xA4;
    /// READ BINARY with the offset carried in a data object (odd INS)
    pub const READ_BINARY_ODD: u8 = 0xB1;
    /// VERIFY
    pub const VERIFY: u8 = 0x20;
    /// MANAGE SECURITY ENVIRONMENT
    pub const MANAGE_SECURITY_ENVIRONMENT: u8 = 0x22;
    /// PERFORM SECURITY OPERATION
    pub const PERFORM_SECURITY_OPERATION: u8 = 0x2A;
}

/// Certificate files are returned in TLV chunks
pub mod chunk {
    /// Tag every chunk starts with
    pub const TAG: u8 = 0x53;
    /// Tag (1 byte) and BER length (2 bytes) preceding the chunk body
    pub const HEADER_LEN: usize = 3;
    /// Offset increment between consecutive reads
    pub const STEP: u16 = 0xE4;
    /// Tag of the offset data object in the READ BINARY command
    pub const OFFSET_TAG: u8 = 0x54;
    /// Expected length of each chunk
    pub const LE: u16 = 0xFF;
}
