//! Object type tags

use anyhow::Context;
use std::io::BufRead;

/// The kind of a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Parse the `<type> <size>\0` header from an object reader
    ///
    /// Consumes the header, leaving the reader positioned at the payload.
    pub fn parse_object_type(reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut header = Vec::new();
        reader
            .read_until(b'\0', &mut header)
            .context("Unable to read object header")?;

        if header.last() != Some(&b'\0') {
            anyhow::bail!("Invalid object header: missing terminator");
        }
        header.pop();

        let header = String::from_utf8(header).context("Invalid object header encoding")?;
        let (object_type, size) = header
            .split_once(' ')
            .context("Invalid object header format")?;
        size.parse::<usize>()
            .context("Invalid object size in header")?;

        match object_type {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => anyhow::bail!("Unknown object type: {}", object_type),
        }
    }
}
