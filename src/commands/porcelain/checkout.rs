use crate::areas::database::PrefixResolution;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::{DeletionScope, Migration};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

pub const UNTRACKED_FILE_MESSAGE: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";

impl Repository {
    /// `checkout -- <file>`: restore a file from HEAD
    pub fn checkout_file(&mut self, file_name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.restore_file(&head, file_name)
    }

    /// `checkout <commit id> -- <file>`: restore a file from a commit
    ///
    /// The commit id may be abbreviated; ambiguous prefixes are rejected.
    pub fn checkout_file_at(&mut self, commit_id: &str, file_name: &str) -> anyhow::Result<()> {
        let Some(oid) = self.resolve_commit_id(commit_id)? else {
            return Ok(());
        };

        let commit = self.database().load_commit(&oid)?;
        self.restore_file(&commit, file_name)
    }

    /// `checkout <branch>`: switch the working tree to another branch
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().contains_branch(branch_name) {
            writeln!(self.writer(), "No such branch exists.")?;
            return Ok(());
        }
        if branch_name == self.refs().active_branch() {
            writeln!(self.writer(), "No need to checkout the current branch.")?;
            return Ok(());
        }
        if Migration::untracked_file_in_the_way(self)? {
            writeln!(self.writer(), "{}", UNTRACKED_FILE_MESSAGE)?;
            return Ok(());
        }

        let tip = self
            .refs()
            .branch_tip(branch_name)
            .cloned()
            .with_context(|| format!("Branch {} vanished from the record", branch_name))?;
        let target = self.database().load_commit(&tip)?;

        {
            let mut migration =
                Migration::new(self, target.tracked().clone(), DeletionScope::TrackedByHead);
            migration.apply_changes()?;
        }

        self.index_mut().clear();
        self.refs_mut().switch_to(branch_name)
    }

    fn restore_file(&self, commit: &Commit, file_name: &str) -> anyhow::Result<()> {
        match commit.tracked_oid(file_name) {
            Some(oid) => {
                let blob = self.database().load_blob(oid)?;
                self.workspace().write_file(file_name, blob.content())
            }
            None => {
                writeln!(self.writer(), "File does not exist in that commit.")?;
                Ok(())
            }
        }
    }

    /// Resolve a full or abbreviated commit id, reporting failures
    ///
    /// Prints the fixed message and returns `None` when the id matches no
    /// commit or more than one.
    pub(crate) fn resolve_commit_id(&self, commit_id: &str) -> anyhow::Result<Option<ObjectId>> {
        match self.database().resolve_prefix(commit_id)? {
            PrefixResolution::Unique(oid) => Ok(Some(oid)),
            PrefixResolution::Missing => {
                writeln!(self.writer(), "No commit with that id exists.")?;
                Ok(None)
            }
            PrefixResolution::Ambiguous => {
                writeln!(self.writer(), "Ambiguous commit id prefix.")?;
                Ok(None)
            }
        }
    }
}
