use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::CommitSummary;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the first-parent history of HEAD, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().head().clone();

        for (oid, summary) in RevList::new(self.history(), head) {
            self.show_commit(&oid, summary)?;
        }

        Ok(())
    }

    /// Print every known commit, newest first, digest as tiebreaker
    pub fn global_log(&self) -> anyhow::Result<()> {
        for (oid, summary) in self.history().iter_by_recency() {
            self.show_commit(oid, summary)?;
        }

        Ok(())
    }

    fn show_commit(&self, oid: &ObjectId, summary: &CommitSummary) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", oid)?;
        writeln!(self.writer(), "Date: {}", summary.readable_timestamp())?;
        writeln!(self.writer(), "{}", summary.message)?;
        writeln!(self.writer())?;

        Ok(())
    }
}
