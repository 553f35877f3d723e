//! References (branches, HEAD, remotes)
//!
//! Branch names map to commit digests in a plain map. The active branch and
//! HEAD move together: `head == branches[active_branch]` holds before and
//! after every command. Remotes map names to filesystem paths of other
//! repositories' `.gitlet` directories.

use crate::areas::record;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Reference state of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    /// Branch name -> commit digest
    branches: BTreeMap<String, ObjectId>,
    /// Branch whose tip moves on the next commit
    active_branch: String,
    /// Digest of the tip of the active branch
    head: ObjectId,
    /// Remote name -> filesystem path of the remote repository directory
    remotes: BTreeMap<String, String>,
}

impl Refs {
    /// Bootstrap the reference state of a fresh repository
    pub fn bootstrap(initial_commit: ObjectId) -> Self {
        Refs {
            branches: BTreeMap::from([(DEFAULT_BRANCH.to_string(), initial_commit.clone())]),
            active_branch: DEFAULT_BRANCH.to_string(),
            head: initial_commit,
            remotes: BTreeMap::new(),
        }
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn active_branch(&self) -> &str {
        &self.active_branch
    }

    pub fn branches(&self) -> &BTreeMap<String, ObjectId> {
        &self.branches
    }

    pub fn contains_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    pub fn branch_tip(&self, name: &str) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    /// Move HEAD and the active branch tip to a new commit
    pub fn advance(&mut self, oid: ObjectId) {
        self.branches
            .insert(self.active_branch.clone(), oid.clone());
        self.head = oid;
    }

    /// Create a branch pointing at the given commit
    pub fn create_branch(&mut self, name: String, oid: ObjectId) {
        self.branches.insert(name, oid);
    }

    /// Point an existing or new branch at the given commit without
    /// touching the active branch
    pub fn set_branch(&mut self, name: String, oid: ObjectId) {
        self.branches.insert(name, oid);
    }

    pub fn delete_branch(&mut self, name: &str) -> Option<ObjectId> {
        self.branches.remove(name)
    }

    /// Make the given branch the active one, moving HEAD to its tip
    ///
    /// The branch must exist; callers check that first.
    pub fn switch_to(&mut self, name: &str) -> anyhow::Result<()> {
        let tip = self
            .branches
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("branch {} does not exist", name))?
            .clone();

        self.active_branch = name.to_string();
        self.head = tip;

        Ok(())
    }

    pub fn contains_remote(&self, name: &str) -> bool {
        self.remotes.contains_key(name)
    }

    pub fn remote_path(&self, name: &str) -> Option<&str> {
        self.remotes.get(name).map(String::as_str)
    }

    pub fn add_remote(&mut self, name: String, path: String) {
        self.remotes.insert(name, path);
    }

    pub fn remove_remote(&mut self, name: &str) -> Option<String> {
        self.remotes.remove(name)
    }

    pub(crate) fn serialize_into<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        record::write_string(writer, &self.active_branch)?;
        record::write_oid(writer, &self.head)?;

        record::write_count(writer, self.branches.len())?;
        for (name, oid) in &self.branches {
            record::write_string(writer, name)?;
            record::write_oid(writer, oid)?;
        }

        record::write_count(writer, self.remotes.len())?;
        for (name, path) in &self.remotes {
            record::write_string(writer, name)?;
            record::write_string(writer, path)?;
        }

        Ok(())
    }

    pub(crate) fn deserialize_from<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let active_branch = record::read_string(reader)?;
        let head = record::read_oid(reader)?;

        let mut branches = BTreeMap::new();
        for _ in 0..record::read_count(reader)? {
            let name = record::read_string(reader)?;
            let oid = record::read_oid(reader)?;
            branches.insert(name, oid);
        }

        let mut remotes = BTreeMap::new();
        for _ in 0..record::read_count(reader)? {
            let name = record::read_string(reader)?;
            let path = record::read_string(reader)?;
            remotes.insert(name, path);
        }

        if !branches.contains_key(&active_branch) {
            anyhow::bail!("Control record names an unknown active branch");
        }

        Ok(Refs {
            branches,
            active_branch,
            head,
            remotes,
        })
    }
}
