//! Core object traits
//!
//! This module defines the traits all Gitlet objects implement:
//! - `Packable`: Serialization to the on-disk binary format
//! - `Unpackable`: Deserialization from the on-disk binary format
//! - `Object`: Common object operations (ID computation)
//!
//! ## Object Format
//!
//! All objects are stored as:
//! ```text
//! <type> <size>\0<payload>
//! ```
//! The serialization is deterministic: a given in-memory record always
//! produces the same bytes, so equal digests imply equal content.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Trait for serializing objects to the on-disk binary format
pub trait Packable {
    /// Serialize the object to bytes (including header)
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for deserializing objects from the on-disk binary format
pub trait Unpackable {
    /// Deserialize the object from a reader (header already consumed)
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Core Gitlet object trait
///
/// Implemented by all object types (Blob, Commit). Provides the digest
/// computation shared by the object store and the staging logic.
pub trait Object: Packable {
    /// Get the object's type
    fn object_type(&self) -> ObjectType;

    /// Compute the object ID (SHA-1 hash over the serialization)
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
