use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    /// Stage a file for addition
    ///
    /// Staging an already-removed name just cancels the removal. Staging a
    /// file whose content equals the HEAD version cancels any pending
    /// addition instead of recording one.
    pub fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        if !self.workspace().file_exists(file_name) {
            writeln!(self.writer(), "File does not exist.")?;
            return Ok(());
        }

        if self.index_mut().unstage_removal(file_name) {
            return Ok(());
        }

        let blob = self.workspace().parse_blob(file_name)?;
        let blob_id = blob.object_id()?;

        if self.head_commit()?.tracked_oid(file_name) == Some(&blob_id) {
            // unchanged since HEAD: nothing to stage
            self.index_mut().unstage_addition(file_name);
            return Ok(());
        }

        self.database().store_blob(&blob)?;
        self.index_mut()
            .stage_addition(file_name.to_string(), blob_id);

        Ok(())
    }
}
