use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::{DeletionScope, Migration};
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::checkout::UNTRACKED_FILE_MESSAGE;
use std::io::Write;

impl Repository {
    /// Move the active branch to a commit and reconcile the working tree
    ///
    /// Accepts an abbreviated commit id. Every working file absent from
    /// the target snapshot is deleted.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let Some(oid) = self.resolve_commit_id(commit_id)? else {
            return Ok(());
        };

        if Migration::untracked_file_in_the_way(self)? {
            writeln!(self.writer(), "{}", UNTRACKED_FILE_MESSAGE)?;
            return Ok(());
        }

        self.reset_to(&oid)
    }

    /// Reconcile the working tree against a commit and advance the active
    /// branch to it
    ///
    /// The internal half of `reset`, also used to advance a remote
    /// repository after a push. Preconditions are the caller's business.
    pub(crate) fn reset_to(&mut self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.database().load_commit(oid)?;

        {
            let mut migration = Migration::new(
                self,
                target.tracked().clone(),
                DeletionScope::AllWorkingFiles,
            );
            migration.apply_changes()?;
        }

        self.index_mut().clear();
        self.refs_mut().advance(oid.clone());

        Ok(())
    }
}
