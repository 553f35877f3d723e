//! Working-tree reconciliation
//!
//! Materializes a target commit's snapshot into the working directory.
//! The migration is planned before any file is touched: deletions and
//! writes are collected first, the untracked-file hazard is checked by the
//! caller before construction, and only then does `apply_changes` mutate
//! the working tree. Deletions run before writes.
//!
//! ## The hazard check
//!
//! A working file whose content digest is not stored as a blob anywhere in
//! the repository would be silently destroyed by a reconciliation. Every
//! destructive operation (branch switch, reset, merge) checks for such
//! files first and aborts without changes when one exists. The check is
//! digest-based: content the repository has seen under any name passes.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Which working files a reconciliation deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionScope {
    /// Files tracked by HEAD but absent from the target (branch switch)
    TrackedByHead,
    /// Every working file absent from the target (reset)
    AllWorkingFiles,
}

/// Planned reconciliation of the working tree against a target snapshot
pub struct Migration<'r> {
    repository: &'r Repository,
    /// The target commit's snapshot
    target: BTreeMap<String, ObjectId>,
    scope: DeletionScope,
    /// Files to delete from the working tree
    deletions: Vec<String>,
    /// Files to write from the target snapshot
    writes: Vec<(String, ObjectId)>,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        target: BTreeMap<String, ObjectId>,
        scope: DeletionScope,
    ) -> Self {
        Self {
            repository,
            target,
            scope,
            deletions: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Check for an untracked file that reconciliation would destroy
    ///
    /// Returns true when any working file's content digest is absent from
    /// the blob store. Callers print the fixed message and abort.
    pub fn untracked_file_in_the_way(repository: &Repository) -> anyhow::Result<bool> {
        for file_name in repository.workspace().list_files()? {
            let blob = repository.workspace().parse_blob(&file_name)?;
            if !repository.database().has_blob(&blob.object_id()?) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Plan and execute the reconciliation
    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.update_workspace()?;

        Ok(())
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let candidates = match self.scope {
            DeletionScope::TrackedByHead => {
                self.repository.head_commit()?.tracked().keys().cloned().collect()
            }
            DeletionScope::AllWorkingFiles => self.repository.workspace().list_files()?,
        };

        self.deletions = candidates
            .into_iter()
            .filter(|file_name| !self.target.contains_key(file_name))
            .collect();

        self.writes = self
            .target
            .iter()
            .map(|(file_name, oid)| (file_name.clone(), oid.clone()))
            .collect();

        Ok(())
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        for file_name in &self.deletions {
            self.repository.workspace().restricted_delete(file_name)?;
        }

        for (file_name, oid) in &self.writes {
            let blob = self.repository.database().load_blob(oid)?;
            self.repository
                .workspace()
                .write_file(file_name, blob.content())?;
        }

        Ok(())
    }
}
