//! APDU command definitions
//!
//! This module provides the command frame type according to ISO/IEC 7816-4 and the
//! length-field encodings a transport may ask for.

use bytes::{BufMut, Bytes, BytesMut};

use crate::Error;

/// Width of the `Lc` and `Le` fields when a command is serialized
///
/// Readers of the DNIe use the short (one byte) form. The two-byte form is the
/// legacy encoding where both length fields are written as big-endian `u16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthWidth {
    /// One byte per length field
    #[default]
    Short,
    /// Two big-endian bytes per length field
    Extended,
}

impl LengthWidth {
    /// Number of bytes used for each length field
    pub const fn size(self) -> usize {
        match self {
            Self::Short => 1,
            Self::Extended => 2,
        }
    }

    /// Largest value a length field can carry
    pub const fn max_value(self) -> usize {
        match self {
            Self::Short => u8::MAX as usize,
            Self::Extended => u16::MAX as usize,
        }
    }

    fn put(self, buffer: &mut BytesMut, value: usize) {
        match self {
            Self::Short => buffer.put_u8(value as u8),
            Self::Extended => buffer.put_u16(value as u16),
        }
    }
}

/// Generic APDU command structure
///
/// A command is an immutable value. `Lc` is never stored separately from the data:
/// it is present exactly when data is present and always equals its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    data: Option<Bytes>,
    le: Option<u16>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Create a new command with expected response length (Le)
    pub const fn new_with_le(cla: u8, ins: u8, p1: u8, p2: u8, le: u16) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: Some(le),
        }
    }

    /// Create a new command with data payload, `Lc` is taken from the data length
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: None,
        }
    }

    /// Create a new command with both data and expected length
    pub fn new_with_data_and_le<T: Into<Bytes>>(
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        data: T,
        le: u16,
    ) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: Some(le),
        }
    }

    /// Create a command from explicit `Lc`, data and `Le` fields
    ///
    /// Fails when `Lc` is given without data, data without `Lc`, or when `Lc` does not
    /// equal the data length.
    pub fn try_new(
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        lc: Option<u16>,
        data: Option<Bytes>,
        le: Option<u16>,
    ) -> Result<Self, Error> {
        match (lc, &data) {
            (None, None) => {}
            (Some(_), None) => return Err(Error::validation("Lc must be absent without data")),
            (None, Some(_)) => return Err(Error::validation("Lc is required with data")),
            (Some(lc), Some(data)) => {
                if lc as usize != data.len() {
                    return Err(Error::validation("Lc must equal the data length"));
                }
            }
        }

        Ok(Self {
            cla,
            ins,
            p1,
            p2,
            data,
            le,
        })
    }

    /// Command class (CLA)
    pub const fn class(&self) -> u8 {
        self.cla
    }

    /// Instruction code (INS)
    pub const fn instruction(&self) -> u8 {
        self.ins
    }

    /// First parameter (P1)
    pub const fn p1(&self) -> u8 {
        self.p1
    }

    /// Second parameter (P2)
    pub const fn p2(&self) -> u8 {
        self.p2
    }

    /// Command payload data (optional)
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Length of the payload (`Lc`), present exactly when data is present
    pub fn lc(&self) -> Option<usize> {
        self.data.as_ref().map(Bytes::len)
    }

    /// Expected response length (optional)
    pub const fn expected_length(&self) -> Option<u16> {
        self.le
    }

    /// The four header bytes `CLA INS P1 P2`
    pub const fn header(&self) -> [u8; 4] {
        [self.cla, self.ins, self.p1, self.p2]
    }

    /// Calculate length of the serialized command for the given width
    pub fn command_length(&self, width: LengthWidth) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;

        if let Some(data) = &self.data {
            length += width.size() + data.len();
        }

        if self.le.is_some() {
            length += width.size();
        }

        length
    }

    /// Convert to raw APDU bytes using the given length-field width
    ///
    /// The output is `CLA INS P1 P2 [Lc data] [Le]`. Fails when `Lc` or `Le` does not
    /// fit in the requested width.
    pub fn to_bytes(&self, width: LengthWidth) -> Result<Bytes, Error> {
        if self
            .data
            .as_ref()
            .is_some_and(|data| data.len() > width.max_value())
        {
            return Err(Error::validation("Lc does not fit the length field width"));
        }
        if self.le.is_some_and(|le| le as usize > width.max_value()) {
            return Err(Error::validation("Le does not fit the length field width"));
        }

        let mut buffer = BytesMut::with_capacity(self.command_length(width));

        buffer.put_slice(&self.header());

        // Add Lc and data if present
        if let Some(data) = &self.data {
            width.put(&mut buffer, data.len());
            buffer.put_slice(data);
        }

        // Add Le if present
        if let Some(le) = self.le {
            width.put(&mut buffer, le as usize);
        }

        Ok(buffer.freeze())
    }

    /// Parse a short-form command from raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < 4 {
            return Err(Error::parse("command shorter than its header"));
        }

        let mut command = Self::new(data[0], data[1], data[2], data[3]);

        if data.len() == 5 {
            // Only Le present, no data
            command.le = Some(data[4] as u16);
        } else if data.len() > 5 {
            let lc = data[4] as usize;
            if lc == 0 || data.len() < 5 + lc {
                return Err(Error::parse("Lc inconsistent with command length"));
            }
            command.data = Some(Bytes::copy_from_slice(&data[5..5 + lc]));

            match data.len() - (5 + lc) {
                0 => {}
                1 => command.le = Some(data[5 + lc] as u16),
                _ => return Err(Error::parse("trailing bytes after Le")),
            }
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let data = Bytes::from_static(&[0xA0, 0x00, 0x00, 0x01, 0x51, 0x00]);
        let cmd = Command::new_with_data_and_le(0x00, 0xA4, 0x04, 0x00, data, 0);
        let bytes = cmd.to_bytes(LengthWidth::Short).unwrap();

        assert_eq!(
            bytes.as_ref(),
            &[0x00, 0xA4, 0x04, 0x00, 0x06, 0xA0, 0x00, 0x00, 0x01, 0x51, 0x00, 0x00]
        );
    }

    #[test]
    fn test_extended_width_serialization() {
        let data = vec![0x54, 0x02, 0x00, 0xE4];
        let cmd = Command::new_with_data_and_le(0x00, 0xB1, 0x00, 0x00, data, 0xFF);
        let bytes = cmd.to_bytes(LengthWidth::Extended).unwrap();

        assert_eq!(hex::encode(&bytes), "00b100000004540200e400ff");
        assert_eq!(bytes.len(), cmd.command_length(LengthWidth::Extended));
    }

    #[test]
    fn test_short_width_rejects_long_data() {
        let cmd = Command::new_with_data(0x00, 0x2A, 0x9E, 0x9A, vec![0u8; 256]);
        assert!(matches!(
            cmd.to_bytes(LengthWidth::Short),
            Err(Error::Validation(_))
        ));
        assert_eq!(
            cmd.to_bytes(LengthWidth::Extended).unwrap().len(),
            4 + 2 + 256
        );

        let cmd = Command::new_with_le(0x00, 0xB0, 0x00, 0x00, 0x100);
        assert!(cmd.to_bytes(LengthWidth::Short).is_err());
    }

    #[test]
    fn test_try_new_enforces_lc() {
        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);

        let cmd = Command::try_new(0x00, 0x20, 0x00, 0x81, Some(3), Some(data.clone()), None)
            .unwrap();
        assert_eq!(cmd.lc(), Some(3));
        assert_eq!(
            cmd.to_bytes(LengthWidth::Short).unwrap().as_ref(),
            &[0x00, 0x20, 0x00, 0x81, 0x03, 0x01, 0x02, 0x03]
        );

        for lc in [0u16, 2, 4, 255] {
            assert!(matches!(
                Command::try_new(0x00, 0x20, 0x00, 0x81, Some(lc), Some(data.clone()), None),
                Err(Error::Validation(_))
            ));
        }

        assert!(Command::try_new(0x00, 0x20, 0x00, 0x81, Some(3), None, None).is_err());
        assert!(Command::try_new(0x00, 0x20, 0x00, 0x81, None, Some(data), None).is_err());

        let header_only = Command::try_new(0x00, 0xA4, 0x04, 0x00, None, None, Some(0xFF)).unwrap();
        assert_eq!(header_only.lc(), None);
        assert_eq!(
            header_only.to_bytes(LengthWidth::Short).unwrap().as_ref(),
            &[0x00, 0xA4, 0x04, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_command_length() {
        let cmd1 = Command::new(0x00, 0xB0, 0x00, 0x00);
        assert_eq!(cmd1.command_length(LengthWidth::Short), 4);

        let cmd2 = Command::new_with_le(0x00, 0xB0, 0x00, 0x00, 0xFF);
        assert_eq!(cmd2.command_length(LengthWidth::Short), 5);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let cmd3 = Command::new_with_data(0x00, 0xD6, 0x00, 0x00, data.clone());
        assert_eq!(cmd3.command_length(LengthWidth::Short), 8);

        let cmd4 = Command::new_with_data_and_le(0x00, 0xD6, 0x00, 0x00, data, 0xFF);
        assert_eq!(cmd4.command_length(LengthWidth::Short), 9);
        assert_eq!(cmd4.command_length(LengthWidth::Extended), 11);
    }

    #[test]
    fn test_command_from_bytes() {
        // Simple command with no data or Le
        let cmd = Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00]).unwrap();
        assert_eq!(cmd.header(), [0x00, 0xA4, 0x04, 0x00]);
        assert!(cmd.data().is_none());
        assert!(cmd.expected_length().is_none());

        // Command with data but no Le
        let cmd = Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00, 0x03, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(cmd.data(), Some(&[0x01, 0x02, 0x03][..]));
        assert!(cmd.expected_length().is_none());

        // Command with data and Le
        let cmd =
            Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00, 0x03, 0x01, 0x02, 0x03, 0xFF]).unwrap();
        assert_eq!(cmd.data(), Some(&[0x01, 0x02, 0x03][..]));
        assert_eq!(cmd.expected_length(), Some(0xFF));

        // Command with no data but with Le
        let cmd = Command::from_bytes(&[0x00, 0xB0, 0x00, 0x00, 0xFF]).unwrap();
        assert!(cmd.data().is_none());
        assert_eq!(cmd.expected_length(), Some(0xFF));

        // Truncated data
        assert!(Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00, 0x05, 0x01]).is_err());
        assert!(Command::from_bytes(&[0x00, 0xA4]).is_err());
    }
}
