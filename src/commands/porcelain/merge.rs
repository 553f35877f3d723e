use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::{DeletionScope, Migration};
use crate::artifacts::merge::resolve::{conflict_marker, plan_merge, MergeAction};
use crate::artifacts::merge::split_point::{ParentChain, SplitPointFinder};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::checkout::UNTRACKED_FILE_MESSAGE;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Merge another branch into the active one
    ///
    /// Runs the preflight checks, short-circuits the ancestor and
    /// fast-forward cases, then plans and executes the three-way merge and
    /// records a commit with both tips as parents.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if Migration::untracked_file_in_the_way(self)? {
            writeln!(self.writer(), "{}", UNTRACKED_FILE_MESSAGE)?;
            return Ok(());
        }
        if !self.index().is_clean() {
            writeln!(self.writer(), "You have uncommitted changes.")?;
            return Ok(());
        }
        if !self.refs().contains_branch(branch_name) {
            writeln!(self.writer(), "A branch with that name does not exist.")?;
            return Ok(());
        }
        if branch_name == self.refs().active_branch() {
            writeln!(self.writer(), "Cannot merge a branch with itself.")?;
            return Ok(());
        }

        let head_oid = self.refs().head().clone();
        let other_oid = self
            .refs()
            .branch_tip(branch_name)
            .cloned()
            .with_context(|| format!("Branch {} vanished from the record", branch_name))?;

        // the secondary split point only exists when HEAD is a merge commit
        let head_is_merge = self
            .history()
            .get(&head_oid)
            .and_then(|summary| summary.parent2.as_ref())
            .is_some();

        let (split, split2) = {
            let history = self.history();
            let finder = SplitPointFinder::new(|oid| history.get(oid));

            let split = finder.find(&head_oid, &other_oid, ParentChain::First);
            let split2 = if head_is_merge {
                finder.find(&head_oid, &other_oid, ParentChain::Second)
            } else {
                None
            };

            (split, split2)
        };

        if split.as_ref() == Some(&other_oid) || split2.as_ref() == Some(&other_oid) {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split.as_ref() == Some(&head_oid) || split2.as_ref() == Some(&head_oid) {
            self.fast_forward(&other_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let active_files = self.head_commit()?.tracked().clone();
        let other_files = self.database().load_commit(&other_oid)?.tracked().clone();
        let split_files = self.snapshot_of(split.as_ref())?;
        let split2_files = match &split2 {
            Some(oid) => Some(self.database().load_commit(oid)?.tracked().clone()),
            None => None,
        };
        let working_files = self.workspace().list_files()?;

        let plan = plan_merge(
            &active_files,
            &other_files,
            &split_files,
            split2_files.as_ref(),
            &working_files,
        );

        for (file_name, action) in &plan.actions {
            match action {
                MergeAction::TakeOther { other } => {
                    let blob = self.database().load_blob(other)?;
                    self.workspace().write_file(file_name, blob.content())?;
                    self.index_mut()
                        .stage_addition(file_name.clone(), other.clone());
                }
                MergeAction::Remove => {
                    self.index_mut().stage_removal(file_name.clone());
                    if self.workspace().file_exists(file_name) {
                        self.workspace().restricted_delete(file_name)?;
                    }
                }
                MergeAction::Conflict { active, other } => {
                    let active_content = self.blob_content_of(active.as_ref())?;
                    let other_content = self.blob_content_of(other.as_ref())?;
                    let content =
                        conflict_marker(active_content.as_ref(), other_content.as_ref());

                    self.workspace().write_file(file_name, &content)?;

                    let blob = Blob::new(file_name.clone(), content);
                    let blob_id = self.database().store_blob(&blob)?;
                    self.index_mut().stage_addition(file_name.clone(), blob_id);
                }
            }
        }

        let message = format!(
            "Merged {} into {}.",
            branch_name,
            self.refs().active_branch()
        );
        self.commit_staged(message, Some(other_oid))?;

        if plan.has_conflict() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Move the active branch up to the other tip without a merge commit
    ///
    /// Reconciles the working tree the way a branch switch does, but the
    /// active branch keeps its name and its pointer advances.
    fn fast_forward(&mut self, other_oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.database().load_commit(other_oid)?;

        {
            let mut migration =
                Migration::new(self, target.tracked().clone(), DeletionScope::TrackedByHead);
            migration.apply_changes()?;
        }

        self.index_mut().clear();
        self.refs_mut().advance(other_oid.clone());

        Ok(())
    }

    /// The tracked snapshot of a commit, or an empty one for no commit
    ///
    /// A missing split point means the tips share no history: every file
    /// counts as new on both sides.
    fn snapshot_of(
        &self,
        oid: Option<&ObjectId>,
    ) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        match oid {
            Some(oid) => Ok(self.database().load_commit(oid)?.tracked().clone()),
            None => Ok(BTreeMap::new()),
        }
    }

    fn blob_content_of(
        &self,
        oid: Option<&ObjectId>,
    ) -> anyhow::Result<Option<bytes::Bytes>> {
        match oid {
            Some(oid) => Ok(Some(self.database().load_blob(oid)?.content().clone())),
            None => Ok(None),
        }
    }
}
