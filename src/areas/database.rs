//! Content-addressed object store
//!
//! The database stores blobs and commits under digest-named files in two
//! flat directories. Objects are immutable; writes are idempotent because
//! filenames are content digests.
//!
//! ## Storage Format
//!
//! - Path: `.gitlet/commits/<digest>` or `.gitlet/blobs/<digest>`
//! - Content: the raw serialized object, `<type> <size>\0<payload>`

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Commit directory name
const COMMITS_DIR: &str = "commits";

/// Blob directory name
const BLOBS_DIR: &str = "blobs";

/// Result of resolving a (possibly abbreviated) commit id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixResolution {
    /// Exactly one stored commit id starts with the prefix
    Unique(ObjectId),
    /// No stored commit id starts with the prefix
    Missing,
    /// Two or more stored commit ids start with the prefix
    Ambiguous,
}

/// Gitlet object database
///
/// Manages storage and retrieval of content-addressable objects. All
/// objects are identified by their SHA-1 hash and stored uncompressed.
#[derive(Debug)]
pub struct Database {
    /// Path to the repository directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(COMMITS_DIR)
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(BLOBS_DIR)
    }

    /// Store a blob, returning its digest
    ///
    /// A no-op when an object with the same digest already exists.
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        self.store(self.blobs_path(), blob)
    }

    /// Store a commit, returning its digest
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(self.commits_path(), commit)
    }

    pub fn has_blob(&self, oid: &ObjectId) -> bool {
        self.blobs_path().join(oid.as_ref()).is_file()
    }

    pub fn has_commit(&self, oid: &ObjectId) -> bool {
        self.commits_path().join(oid.as_ref()).is_file()
    }

    /// Load a blob, failing when the digest is not stored
    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.open_object(self.blobs_path(), oid, ObjectType::Blob)?;
        Blob::deserialize(reader)
    }

    /// Load a commit, failing when the digest is not stored
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.open_object(self.commits_path(), oid, ObjectType::Commit)?;
        Commit::deserialize(reader)
    }

    /// Resolve a full or abbreviated commit id against the commit store
    ///
    /// A full-length id resolves to itself when stored. Shorter prefixes
    /// are matched against every stored commit; a prefix matching more
    /// than one commit is reported as ambiguous rather than picking one.
    pub fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<PrefixResolution> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(PrefixResolution::Missing);
        }
        let prefix = prefix.to_lowercase();

        if prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(prefix)?;
            return Ok(if self.has_commit(&oid) {
                PrefixResolution::Unique(oid)
            } else {
                PrefixResolution::Missing
            });
        }

        let mut matched = None;
        for entry in std::fs::read_dir(self.commits_path())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(&prefix) {
                if matched.is_some() {
                    return Ok(PrefixResolution::Ambiguous);
                }
                matched = Some(ObjectId::try_parse(file_name.to_string())?);
            }
        }

        Ok(match matched {
            Some(oid) => PrefixResolution::Unique(oid),
            None => PrefixResolution::Missing,
        })
    }

    fn store(&self, dir: PathBuf, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = dir.join(oid.as_ref());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(oid)
    }

    fn open_object(
        &self,
        dir: PathBuf,
        oid: &ObjectId,
        expected_type: ObjectType,
    ) -> anyhow::Result<impl std::io::BufRead> {
        let object_path = dir.join(oid.as_ref());
        let content = std::fs::read(&object_path)
            .with_context(|| format!("Missing object {}", oid.as_ref()))?;

        let mut reader = Cursor::new(Bytes::from(content));
        let object_type = ObjectType::parse_object_type(&mut reader)
            .with_context(|| format!("Corrupt object {}", oid.as_ref()))?;

        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected {}",
                oid.as_ref(),
                object_type.as_str(),
                expected_type.as_str()
            );
        }

        Ok(reader)
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!(
                    "Unable to open object file {}",
                    temp_object_path.display()
                )
            })?;

        file.write_all(&content).with_context(|| {
            format!(
                "Unable to write object file {}",
                temp_object_path.display()
            )
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
