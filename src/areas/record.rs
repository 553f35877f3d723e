//! Control-record codec primitives
//!
//! The whole mutable state of a repository (refs, index, remotes, commit
//! summaries) lives in a single binary file, written once at the end of
//! every command. The file carries a signature, a format version, and a
//! trailing SHA-1 checksum over everything before it; a mismatch on load is
//! treated as corruption.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Record file signature
pub const SIGNATURE: &[u8; 4] = b"GLET";

/// Record format version
pub const VERSION: u32 = 1;

/// Size of the trailing SHA-1 checksum in bytes
const CHECKSUM_SIZE: usize = 20;

/// Reader/writer adapter that hashes everything passing through it
///
/// Mirrors the integrity scheme of the index file format: the payload is
/// followed by a SHA-1 digest of the payload, verified on load and
/// appended on save.
pub struct Checksum<T> {
    inner: T,
    hasher: Sha1,
}

impl<T> Checksum<T> {
    pub fn new(inner: T) -> Self {
        Checksum {
            inner,
            hasher: Sha1::new(),
        }
    }
}

impl<T: Read> Checksum<T> {
    /// Verify the trailing checksum against the bytes read so far
    ///
    /// Must be called after the payload has been fully consumed.
    pub fn verify(mut self) -> anyhow::Result<()> {
        let expected = self.hasher.finalize();

        let mut stored = [0u8; CHECKSUM_SIZE];
        self.inner
            .read_exact(&mut stored)
            .context("Control record is truncated")?;

        if stored != expected.as_slice() {
            anyhow::bail!("Control record checksum mismatch");
        }

        Ok(())
    }
}

impl<T: Read> Read for Checksum<T> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.hasher.update(&buf[..read]);
        Ok(read)
    }
}

impl<T: Write> Checksum<T> {
    /// Append the checksum of everything written so far
    pub fn write_checksum(mut self) -> anyhow::Result<()> {
        let digest = self.hasher.clone().finalize();
        self.inner
            .write_all(&digest)
            .context("Unable to write control record checksum")?;
        self.inner.flush()?;

        Ok(())
    }
}

impl<T: Write> Write for Checksum<T> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

pub fn write_string<W: Write>(writer: &mut W, value: &str) -> anyhow::Result<()> {
    writer.write_u32::<BigEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;

    Ok(())
}

pub fn read_string<R: Read>(reader: &mut R) -> anyhow::Result<String> {
    let length = reader.read_u32::<BigEndian>()? as usize;
    let mut buffer = vec![0u8; length];
    reader.read_exact(&mut buffer)?;

    String::from_utf8(buffer).context("Control record holds a non-UTF-8 string")
}

pub fn write_oid<W: Write>(writer: &mut W, oid: &ObjectId) -> anyhow::Result<()> {
    oid.write_h40_to(writer)
}

pub fn read_oid<R: Read>(reader: &mut R) -> anyhow::Result<ObjectId> {
    ObjectId::read_h40_from(reader)
}

pub fn write_optional_oid<W: Write>(
    writer: &mut W,
    oid: Option<&ObjectId>,
) -> anyhow::Result<()> {
    match oid {
        Some(oid) => {
            writer.write_u8(1)?;
            write_oid(writer, oid)
        }
        None => Ok(writer.write_u8(0)?),
    }
}

pub fn read_optional_oid<R: Read>(reader: &mut R) -> anyhow::Result<Option<ObjectId>> {
    match reader.read_u8()? {
        0 => Ok(None),
        1 => Ok(Some(read_oid(reader)?)),
        marker => anyhow::bail!("Invalid optional id marker: {}", marker),
    }
}

pub fn write_count<W: Write>(writer: &mut W, count: usize) -> anyhow::Result<()> {
    Ok(writer.write_u32::<BigEndian>(count as u32)?)
}

pub fn read_count<R: Read>(reader: &mut R) -> anyhow::Result<usize> {
    Ok(reader.read_u32::<BigEndian>()? as usize)
}
