use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the ids of every commit whose message contains the query
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let matches = self
            .history()
            .iter_by_recency()
            .into_iter()
            .filter(|(_, summary)| summary.message.contains(message))
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();

        if matches.is_empty() {
            writeln!(self.writer(), "Found no commit with that message.")?;
            return Ok(());
        }

        for oid in matches {
            writeln!(self.writer(), "{}", oid)?;
        }

        Ok(())
    }
}
