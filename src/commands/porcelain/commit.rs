use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Create a commit from the staging area
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            writeln!(self.writer(), "Please enter a commit message.")?;
            return Ok(());
        }

        self.commit_staged(message.to_string(), None)
    }

    /// Apply the staging area on top of HEAD's snapshot and record the
    /// resulting commit
    ///
    /// Shared by `commit` (no second parent) and `merge` (the other tip as
    /// second parent).
    pub(crate) fn commit_staged(
        &mut self,
        message: String,
        parent2: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        if self.index().is_clean() {
            writeln!(self.writer(), "No changes added to the commit.")?;
            return Ok(());
        }

        let mut tracked = self.head_commit()?.tracked().clone();
        for (file_name, oid) in self.index().staged_add() {
            tracked.insert(file_name.clone(), oid.clone());
        }
        for file_name in self.index().staged_remove() {
            tracked.remove(file_name);
        }
        self.index_mut().clear();

        let commit = Commit::new(
            Some(self.refs().head().clone()),
            parent2,
            chrono::Local::now().fixed_offset(),
            message,
            tracked,
        );
        self.record_commit(&commit)?;

        Ok(())
    }

    /// Store a commit, record its summary, and advance HEAD and the
    /// active branch tip
    pub(crate) fn record_commit(&mut self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let oid = self.database().store_commit(commit)?;
        self.history_mut().record(oid.clone(), commit.summary());
        self.refs_mut().advance(oid.clone());

        Ok(oid)
    }
}
