//! Gitlet blob object
//!
//! A blob is an immutable `(file name, bytes)` pair. The name participates
//! in the serialization, so identical bytes saved under two different names
//! produce two different digests.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<file name>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Blob object holding one file's content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Name of the file this content was read from
    file_name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::new();
        payload.write_all(self.file_name.as_bytes())?;
        payload.write_all(&[0])?;
        payload.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), payload.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&payload)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let payload = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let separator = payload
            .iter()
            .position(|byte| *byte == 0)
            .context("Invalid blob object: missing file name terminator")?;

        let file_name = String::from_utf8(payload[..separator].to_vec())
            .context("Invalid blob object: file name is not UTF-8")?;
        let content = Bytes::copy_from_slice(&payload[separator + 1..]);

        Ok(Self::new(file_name, content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
