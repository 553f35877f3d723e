use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Stage a file for removal
    ///
    /// Removing a staged-for-addition name just unstages it. Removing a
    /// HEAD-tracked name stages the removal and deletes the working copy.
    pub fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        if self.index_mut().unstage_addition(file_name) {
            return Ok(());
        }

        if self.head_commit()?.tracked_oid(file_name).is_some() {
            self.index_mut().stage_removal(file_name.to_string());
            if self.workspace().file_exists(file_name) {
                self.workspace().restricted_delete(file_name)?;
            }
            return Ok(());
        }

        writeln!(self.writer(), "No reason to remove the file.")?;
        Ok(())
    }
}
