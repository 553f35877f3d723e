use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at HEAD
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().contains_branch(branch_name) {
            writeln!(self.writer(), "A branch with that name already exists.")?;
            return Ok(());
        }

        let head = self.refs().head().clone();
        self.refs_mut().create_branch(branch_name.to_string(), head);

        Ok(())
    }

    /// Delete a branch pointer (never the active one)
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().contains_branch(branch_name) {
            writeln!(self.writer(), "A branch with that name does not exist.")?;
            return Ok(());
        }
        if branch_name == self.refs().active_branch() {
            writeln!(self.writer(), "Cannot remove the current branch.")?;
            return Ok(());
        }

        self.refs_mut().delete_branch(branch_name);

        Ok(())
    }
}
