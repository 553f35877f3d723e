//! Gitlet object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings. They identify both
//! blobs and commits; two equal digests imply equal serialized content.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;

/// Gitlet object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string. Implements parsing,
/// binary (20-byte) serialization, and abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_lowercase()))
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Used by the control-record codec, which stores ids compactly.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        let mut buffer = [0; 1];

        for _ in 0..(OBJECT_ID_LENGTH / 2) {
            reader.read_exact(&mut buffer)?;
            let hex_pair = &format!("{:02x}", u8::from_be_bytes(buffer));
            hex40.push_str(hex_pair);
        }

        Self::try_parse(hex40)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn round_trips_through_binary_form(id in "[0-9a-f]{40}") {
            let oid = ObjectId::try_parse(id).unwrap();

            let mut buffer = Vec::new();
            oid.write_h40_to(&mut buffer).unwrap();
            assert_eq!(buffer.len(), 20);

            let parsed = ObjectId::read_h40_from(&mut buffer.as_slice()).unwrap();
            assert_eq!(parsed, oid);
        }

        #[test]
        fn rejects_wrong_length(id in "[0-9a-f]{0,39}") {
            assert!(ObjectId::try_parse(id).is_err());
        }
    }

    #[test]
    fn rejects_non_hex_characters() {
        let id = "g".repeat(40);
        assert!(ObjectId::try_parse(id).is_err());
    }

    #[test]
    fn uppercase_ids_are_normalized() {
        let oid = ObjectId::try_parse("AB".repeat(20)).unwrap();
        assert_eq!(oid.as_ref(), "ab".repeat(20));
    }
}
