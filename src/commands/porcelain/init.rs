use crate::areas::database::Database;
use crate::areas::history::History;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::{Repository, GITLET_DIR};
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create a new repository in the given directory
    ///
    /// Lays out `.gitlet/` with its object directories, stores the initial
    /// commit (no parents, no tracked files, epoch timestamp), and writes
    /// the first control record with `master` as the active branch.
    pub fn initialize(path: &Path, mut writer: Box<dyn Write>) -> anyhow::Result<()> {
        if path.join(GITLET_DIR).exists() {
            writeln!(
                writer,
                "A Gitlet version-control system already exists in the current directory."
            )?;
            return Ok(());
        }

        let gitlet_path = path.join(GITLET_DIR);
        let database = Database::new(gitlet_path.clone().into_boxed_path());

        std::fs::create_dir_all(database.commits_path())
            .context("Failed to create the commits directory")?;
        std::fs::create_dir_all(database.blobs_path())
            .context("Failed to create the blobs directory")?;

        let initial_commit = Commit::initial();
        let oid = database.store_commit(&initial_commit)?;

        let mut history = History::new();
        history.record(oid.clone(), initial_commit.summary());

        let repository =
            Repository::assemble(path, writer, Refs::bootstrap(oid), Index::new(), history);
        repository.save()
    }
}
