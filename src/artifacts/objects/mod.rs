//! Gitlet object types (blob, commit)
//!
//! Objects are immutable, content-addressed records. Each object serializes
//! to a deterministic byte sequence and is identified by the SHA-1 hash of
//! that sequence.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of an object ID in hexadecimal characters
pub const OBJECT_ID_LENGTH: usize = 40;
