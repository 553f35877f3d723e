//! Commit-summary graph
//!
//! The control record keeps a reduced view of every commit the repository
//! knows about, so log, global-log, find, and the split-point search never
//! have to deserialize full commit objects.

use crate::areas::record;
use crate::artifacts::objects::commit::{CommitSummary, TIMESTAMP_FORMAT};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// The commit graph as recorded summaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    commits: BTreeMap<ObjectId, CommitSummary>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, oid: ObjectId, summary: CommitSummary) {
        self.commits.insert(oid, summary);
    }

    pub fn get(&self, oid: &ObjectId) -> Option<&CommitSummary> {
        self.commits.get(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    /// Iterate all known commits, newest first, digest as tiebreaker
    ///
    /// This is the deterministic order global-log and find print in.
    pub fn iter_by_recency(&self) -> Vec<(&ObjectId, &CommitSummary)> {
        let mut commits = self.commits.iter().collect::<Vec<_>>();
        commits.sort_by(|(left_oid, left), (right_oid, right)| {
            right
                .timestamp
                .cmp(&left.timestamp)
                .then_with(|| left_oid.cmp(right_oid))
        });

        commits
    }

    pub(crate) fn serialize_into<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        record::write_count(writer, self.commits.len())?;
        for (oid, summary) in &self.commits {
            record::write_oid(writer, oid)?;
            record::write_optional_oid(writer, summary.parent.as_ref())?;
            record::write_optional_oid(writer, summary.parent2.as_ref())?;
            record::write_string(writer, &summary.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
            record::write_string(writer, &summary.message)?;
        }

        Ok(())
    }

    pub(crate) fn deserialize_from<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let mut commits = BTreeMap::new();
        for _ in 0..record::read_count(reader)? {
            let oid = record::read_oid(reader)?;
            let parent = record::read_optional_oid(reader)?;
            let parent2 = record::read_optional_oid(reader)?;
            let timestamp = record::read_string(reader)?;
            let timestamp = chrono::DateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
                .context("Control record holds an unparseable commit timestamp")?;
            let message = record::read_string(reader)?;

            commits.insert(
                oid,
                CommitSummary {
                    parent,
                    parent2,
                    timestamp,
                    message,
                },
            );
        }

        Ok(History { commits })
    }
}
