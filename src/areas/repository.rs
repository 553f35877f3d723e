//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! repository operations. It acts as a facade over the lower-level areas
//! (database, workspace, refs, index, history) and carries the mutable
//! control record between a single load at command start and a single save
//! at command end.
//!
//! ## Control Record
//!
//! All mutable state (refs, index, remotes, commit summaries) is one binary
//! file, `.gitlet/repository`. Object files are immutable and live outside
//! the record, so a command killed mid-way leaves at worst unreferenced
//! objects behind.

use crate::areas::database::Database;
use crate::areas::history::History;
use crate::areas::index::Index;
use crate::areas::record::{self, Checksum};
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use file_guard::Lock;
use std::cell::{RefCell, RefMut};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Repository directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Control record file name
const RECORD_FILE: &str = "repository";

/// Gitlet repository
///
/// Coordinates all repository operations and provides access to the
/// database, workspace, refs, index, and commit history. This is the main
/// entry point for all commands.
pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout, or a sink for remote repositories)
    writer: RefCell<Box<dyn Write>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Branches, HEAD, remotes
    refs: Refs,
    /// Staging area
    index: Index,
    /// Commit summaries
    history: History,
}

impl Repository {
    /// Check whether a working directory holds an initialized repository
    pub fn is_initialized(path: &Path) -> bool {
        path.join(GITLET_DIR).is_dir()
    }

    /// Assemble a repository from freshly built areas (used by `init`)
    pub(crate) fn assemble(
        path: &Path,
        writer: Box<dyn Write>,
        refs: Refs,
        index: Index,
        history: History,
    ) -> Self {
        let gitlet_path = path.join(GITLET_DIR).into_boxed_path();

        Repository {
            path: path.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            database: Database::new(gitlet_path.clone()),
            workspace: Workspace::new(path.to_path_buf().into_boxed_path()),
            refs,
            index,
            history,
        }
    }

    /// Load the repository rooted at the given working directory
    pub fn load(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let record_path = path.join(GITLET_DIR).join(RECORD_FILE);

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .open(&record_path)
            .with_context(|| format!("Unable to open control record {}", record_path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;

        let mut reader = Checksum::new(std::io::BufReader::new(lock.deref_mut()));

        let mut signature = [0u8; 4];
        reader
            .read_exact(&mut signature)
            .context("Control record is truncated")?;
        if &signature != record::SIGNATURE {
            anyhow::bail!("Invalid control record signature");
        }

        let version = reader.read_u32::<BigEndian>()?;
        if version != record::VERSION {
            anyhow::bail!("Unsupported control record version: {}", version);
        }

        let refs = Refs::deserialize_from(&mut reader)?;
        let index = Index::deserialize_from(&mut reader)?;
        let history = History::deserialize_from(&mut reader)?;

        reader.verify()?;

        Ok(Self::assemble(path, writer, refs, index, history))
    }

    /// Load a remote repository from the path of its `.gitlet` directory
    ///
    /// Remote repositories run silently: their output is discarded.
    pub fn open_remote(gitlet_path: &Path) -> anyhow::Result<Self> {
        let workdir = gitlet_path
            .parent()
            .with_context(|| format!("Invalid remote path {}", gitlet_path.display()))?;

        Self::load(workdir, Box::new(std::io::sink()))
    }

    /// Write the control record back, replacing the previous one
    ///
    /// Takes an exclusive advisory lock for the duration of the write.
    pub fn save(&self) -> anyhow::Result<()> {
        let record_path = self.record_path();

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&record_path)
            .with_context(|| format!("Unable to open control record {}", record_path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(std::io::BufWriter::new(lock.deref_mut()));

        writer.write_all(record::SIGNATURE)?;
        writer.write_u32::<BigEndian>(record::VERSION)?;

        self.refs.serialize_into(&mut writer)?;
        self.index.serialize_into(&mut writer)?;
        self.history.serialize_into(&mut writer)?;

        writer.write_checksum()
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    fn record_path(&self) -> PathBuf {
        self.gitlet_path().join(RECORD_FILE)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Load the full commit HEAD points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.load_commit(self.refs.head())
    }
}
