use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use std::io::Write;

impl Repository {
    /// Print the five status sections, each terminated by a blank line
    pub fn status(&self) -> anyhow::Result<()> {
        let report = Inspector::new(self).report()?;

        self.print_section("=== Branches ===", &report.branches)?;
        self.print_section("=== Staged Files ===", &report.staged)?;
        self.print_section("=== Removed Files ===", &report.removed)?;
        self.print_section(
            "=== Modifications Not Staged For Commit ===",
            &report.modified,
        )?;
        self.print_section("=== Untracked Files ===", &report.untracked)?;

        Ok(())
    }

    fn print_section(&self, header: &str, entries: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", header)?;
        for entry in entries {
            writeln!(self.writer(), "{}", entry)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
