//! Staging area (index)
//!
//! Tracks the files staged for addition (name to blob digest) and the files
//! staged for removal from the next commit's snapshot. The two sets are
//! kept disjoint: staging one side of a name clears the other.

use crate::areas::record;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

/// Gitlet staging area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    /// Pending additions: file name -> blob digest
    staged_add: BTreeMap<String, ObjectId>,
    /// Pending removals from the next commit's tracking
    staged_remove: BTreeSet<String>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged_add(&self) -> &BTreeMap<String, ObjectId> {
        &self.staged_add
    }

    pub fn staged_remove(&self) -> &BTreeSet<String> {
        &self.staged_remove
    }

    pub fn is_clean(&self) -> bool {
        self.staged_add.is_empty() && self.staged_remove.is_empty()
    }

    pub fn is_staged_for_addition(&self, file_name: &str) -> bool {
        self.staged_add.contains_key(file_name)
    }

    pub fn is_staged_for_removal(&self, file_name: &str) -> bool {
        self.staged_remove.contains(file_name)
    }

    /// Stage a file for addition, clearing any pending removal of the name
    pub fn stage_addition(&mut self, file_name: String, oid: ObjectId) {
        self.staged_remove.remove(&file_name);
        self.staged_add.insert(file_name, oid);
    }

    /// Drop a pending addition, returning true when one existed
    pub fn unstage_addition(&mut self, file_name: &str) -> bool {
        self.staged_add.remove(file_name).is_some()
    }

    /// Stage a file for removal, clearing any pending addition of the name
    pub fn stage_removal(&mut self, file_name: String) {
        self.staged_add.remove(&file_name);
        self.staged_remove.insert(file_name);
    }

    /// Drop a pending removal, returning true when one existed
    pub fn unstage_removal(&mut self, file_name: &str) -> bool {
        self.staged_remove.remove(file_name)
    }

    pub fn clear(&mut self) {
        self.staged_add.clear();
        self.staged_remove.clear();
    }

    pub(crate) fn serialize_into<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        record::write_count(writer, self.staged_add.len())?;
        for (file_name, oid) in &self.staged_add {
            record::write_string(writer, file_name)?;
            record::write_oid(writer, oid)?;
        }

        record::write_count(writer, self.staged_remove.len())?;
        for file_name in &self.staged_remove {
            record::write_string(writer, file_name)?;
        }

        Ok(())
    }

    pub(crate) fn deserialize_from<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let mut staged_add = BTreeMap::new();
        for _ in 0..record::read_count(reader)? {
            let file_name = record::read_string(reader)?;
            let oid = record::read_oid(reader)?;
            staged_add.insert(file_name, oid);
        }

        let mut staged_remove = BTreeSet::new();
        for _ in 0..record::read_count(reader)? {
            staged_remove.insert(record::read_string(reader)?);
        }

        Ok(Index {
            staged_add,
            staged_remove,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    #[test]
    fn staging_sides_stay_disjoint() {
        let mut index = Index::new();

        index.stage_removal("wug.txt".to_string());
        index.stage_addition("wug.txt".to_string(), oid(1));
        assert!(index.is_staged_for_addition("wug.txt"));
        assert!(!index.is_staged_for_removal("wug.txt"));

        index.stage_removal("wug.txt".to_string());
        assert!(!index.is_staged_for_addition("wug.txt"));
        assert!(index.is_staged_for_removal("wug.txt"));
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut index = Index::new();
        index.stage_addition("a.txt".to_string(), oid(1));
        index.stage_removal("b.txt".to_string());

        index.clear();
        assert!(index.is_clean());
    }

    proptest! {
        #[test]
        fn codec_round_trips(
            additions in proptest::collection::btree_map("[a-z]{1,10}\\.txt", 0u8..=255, 0..8),
            removals in proptest::collection::btree_set("[a-z]{1,10}\\.dat", 0..8),
        ) {
            let mut index = Index::new();
            for (name, seed) in additions {
                index.stage_addition(name, oid(seed));
            }
            for name in removals {
                index.stage_removal(name);
            }

            let mut buffer = Vec::new();
            index.serialize_into(&mut buffer).unwrap();
            let parsed = Index::deserialize_from(&mut Cursor::new(buffer)).unwrap();

            assert_eq!(parsed, index);
        }
    }
}
