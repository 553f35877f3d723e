//! Gitlet commit object
//!
//! A commit is a complete snapshot of the tracked files, not a delta. It
//! records up to two parent digests (the second one only for merge
//! commits), a formatted timestamp, a message, and the full file-name to
//! blob-digest mapping.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <second-parent-sha>
//! date <timestamp>
//! track <blob-sha> <file name>
//!
//! <commit message>
//! ```
//!
//! The tracked mapping is kept in a `BTreeMap`, so the serialization is
//! deterministic and identical snapshots digest identically.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Timestamp display format, e.g. `Thu Jan 01 00:00:00 1970 +0000`
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Reduced view of a commit kept in the control record
///
/// Holds everything log, find, and the graph walks need without
/// deserializing the full commit from the object store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommitSummary {
    /// First parent, absent only for the initial commit
    pub parent: Option<ObjectId>,
    /// Second parent, present iff the commit was created by a merge
    pub parent2: Option<ObjectId>,
    /// Commit timestamp
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Commit message
    pub message: String,
}

impl CommitSummary {
    /// Format the timestamp the way log blocks display it
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Gitlet commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// First parent (None for the initial commit)
    parent: Option<ObjectId>,
    /// Second parent (present iff created by merge)
    parent2: Option<ObjectId>,
    /// Commit timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Commit message
    message: String,
    /// Complete snapshot: file name -> blob digest
    tracked: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        parent2: Option<ObjectId>,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        message: String,
        tracked: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            parent,
            parent2,
            timestamp,
            message,
            tracked,
        }
    }

    /// The initial commit: no parents, no tracked files, epoch timestamp
    pub fn initial() -> Self {
        Commit {
            parent: None,
            parent2: None,
            timestamp: chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            message: "initial commit".to_string(),
            tracked: BTreeMap::new(),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.tracked
    }

    /// Look up the blob digest tracked under the given file name
    pub fn tracked_oid(&self, file_name: &str) -> Option<&ObjectId> {
        self.tracked.get(file_name)
    }

    /// Produce the reduced view stored in the control record
    pub fn summary(&self) -> CommitSummary {
        CommitSummary {
            parent: self.parent.clone(),
            parent2: self.parent2.clone(),
            timestamp: self.timestamp,
            message: self.message.clone(),
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in [&self.parent, &self.parent2].into_iter().flatten() {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("date {}", self.timestamp.format(TIMESTAMP_FORMAT)));
        for (file_name, oid) in &self.tracked {
            lines.push(format!("track {} {}", oid.as_ref(), file_name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        let payload = lines.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), payload.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(payload.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let payload = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let payload = String::from_utf8(payload).context("Invalid commit object encoding")?;
        let mut lines = payload.lines();

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            if parents.len() == 2 {
                anyhow::bail!("Invalid commit object: more than two parents");
            }
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        let date = next_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let timestamp = chrono::DateTime::parse_from_str(date, TIMESTAMP_FORMAT)
            .context("Invalid commit object: unparseable timestamp")?;

        let mut tracked = BTreeMap::new();
        for line in lines.by_ref() {
            match line.strip_prefix("track ") {
                Some(entry) => {
                    let (oid, file_name) = entry
                        .split_once(' ')
                        .context("Invalid commit object: invalid track line")?;
                    tracked.insert(file_name.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                // the blank separator line before the message
                None => break,
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        let mut parents = parents.into_iter();
        Ok(Self::new(
            parents.next(),
            parents.next(),
            timestamp,
            message,
            tracked,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_type::ObjectType;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    fn round_trip(commit: &Commit) -> Commit {
        let serialized = commit.serialize().unwrap();
        let mut reader = Cursor::new(serialized);
        let object_type = ObjectType::parse_object_type(&mut reader).unwrap();
        assert_eq!(object_type, ObjectType::Commit);
        Commit::deserialize(reader).unwrap()
    }

    #[test]
    fn initial_commit_has_no_parents_and_epoch_timestamp() {
        let commit = Commit::initial();

        assert!(commit.parent().is_none());
        assert!(commit.parent2().is_none());
        assert!(commit.tracked().is_empty());
        assert_eq!(
            commit.summary().readable_timestamp(),
            "Thu Jan 01 00:00:00 1970 +0000"
        );
    }

    #[test]
    fn initial_commit_round_trips() {
        let commit = Commit::initial();
        let parsed = round_trip(&commit);

        assert_eq!(parsed, commit);
        assert_eq!(parsed.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn merge_commit_round_trips_with_both_parents() {
        let tracked = BTreeMap::from([
            ("a.txt".to_string(), oid(1)),
            ("name with spaces.txt".to_string(), oid(2)),
        ]);
        let commit = Commit::new(
            Some(oid(3)),
            Some(oid(4)),
            chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            "Merged other into master.".to_string(),
            tracked,
        );

        let parsed = round_trip(&commit);
        assert_eq!(parsed, commit);
    }

    #[test]
    fn multi_line_message_round_trips() {
        let commit = Commit::new(
            Some(oid(5)),
            None,
            chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            "subject\n\nbody line one\nbody line two".to_string(),
            BTreeMap::new(),
        );

        let parsed = round_trip(&commit);
        assert_eq!(parsed.message(), commit.message());
    }

    proptest! {
        #[test]
        fn digest_is_stable_across_round_trips(
            message in "[a-zA-Z0-9 .,!?-]{1,60}",
            file_names in proptest::collection::btree_set("[a-z]{1,10}\\.txt", 0..8),
            seed in 0u8..=255,
        ) {
            let tracked = file_names
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, oid(seed.wrapping_add(i as u8))))
                .collect::<BTreeMap<_, _>>();
            let commit = Commit::new(
                Some(oid(seed)),
                None,
                chrono::DateTime::UNIX_EPOCH.fixed_offset(),
                message,
                tracked,
            );

            let parsed = round_trip(&commit);
            prop_assert_eq!(parsed.object_id().unwrap(), commit.object_id().unwrap());
        }
    }
}
