//! Working tree status inspection
//!
//! Computes the five sections of the `status` report without mutating
//! anything: branches, staged files, removed files, unstaged
//! modifications, and untracked files.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// The computed status report, ready for printing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Branch names in sorted order, the active one prefixed with `*`
    pub branches: Vec<String>,
    /// Files staged for addition, sorted
    pub staged: Vec<String>,
    /// Files staged for removal, sorted
    pub removed: Vec<String>,
    /// Tracked or staged files missing/modified in the working tree,
    /// suffixed `(deleted)` or `(modified)`, sorted case-insensitively
    pub modified: Vec<String>,
    /// Working files whose content the repository has never stored,
    /// sorted case-insensitively
    pub untracked: Vec<String>,
}

/// Status inspector over a loaded repository
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Self { repository }
    }

    pub fn report(&self) -> anyhow::Result<StatusReport> {
        let modified = self.modified_section()?;
        let untracked = self.untracked_section(&modified)?;

        Ok(StatusReport {
            branches: self.branch_section(),
            staged: self.staged_section(),
            removed: self.removed_section(),
            modified,
            untracked,
        })
    }

    fn branch_section(&self) -> Vec<String> {
        self.repository
            .refs()
            .branches()
            .keys()
            .map(|name| {
                if name == self.repository.refs().active_branch() {
                    format!("*{}", name)
                } else {
                    name.clone()
                }
            })
            .collect()
    }

    fn staged_section(&self) -> Vec<String> {
        self.repository.index().staged_add().keys().cloned().collect()
    }

    fn removed_section(&self) -> Vec<String> {
        self.repository.index().staged_remove().iter().cloned().collect()
    }

    /// Files the next commit would track, with their expected digests
    fn expected_snapshot(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut expected = self.repository.head_commit()?.tracked().clone();

        for (file_name, oid) in self.repository.index().staged_add() {
            expected.insert(file_name.clone(), oid.clone());
        }
        for file_name in self.repository.index().staged_remove() {
            expected.remove(file_name);
        }

        Ok(expected)
    }

    fn modified_section(&self) -> anyhow::Result<Vec<String>> {
        let workspace = self.repository.workspace();
        let mut modified = Vec::new();

        for (file_name, expected_oid) in self.expected_snapshot()? {
            if !workspace.file_exists(&file_name) {
                modified.push(format!("{} (deleted)", file_name));
                continue;
            }

            let working_oid = workspace.parse_blob(&file_name)?.object_id()?;
            if working_oid != expected_oid {
                modified.push(format!("{} (modified)", file_name));
            }
        }

        modified.sort_by_key(|entry| entry.to_lowercase());
        Ok(modified)
    }

    /// Working files with unknown content, minus those already reported
    /// as unstaged modifications
    fn untracked_section(&self, modified: &[String]) -> anyhow::Result<Vec<String>> {
        let modified_names = modified
            .iter()
            .filter_map(|entry| entry.rsplit_once(' ').map(|(name, _)| name))
            .collect::<std::collections::BTreeSet<_>>();

        let workspace = self.repository.workspace();
        let mut untracked = Vec::new();

        for file_name in workspace.list_files()? {
            if modified_names.contains(file_name.as_str()) {
                continue;
            }

            let working_oid = workspace.parse_blob(&file_name)?.object_id()?;
            if !self.repository.database().has_blob(&working_oid) {
                untracked.push(file_name);
            }
        }

        untracked.sort_by_key(|entry| entry.to_lowercase());
        Ok(untracked)
    }
}
