use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".gitlet", ".", ".."];

/// Working directory wrapper
///
/// The tracked universe is flat: top-level plain files in the repository
/// root. The repository directory itself is never listed.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// List the plain files in the working directory, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let files = WalkDir::new(self.path.as_ref())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if IGNORED_PATHS.contains(&name.as_str()) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();

        Ok(files)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Read a working file into a blob named after it
    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(file_name)?;
        Ok(Blob::new(file_name.to_string(), content))
    }

    /// Delete a working file, refusing to operate outside an initialized
    /// repository
    ///
    /// Returns true when a file was actually removed.
    pub fn restricted_delete(&self, file_name: &str) -> anyhow::Result<bool> {
        if !self.path.join(".gitlet").is_dir() {
            anyhow::bail!(
                "Refusing to delete outside an initialized directory: {}",
                self.path.display()
            );
        }

        let file_path = self.path.join(file_name);
        if !file_path.is_file() {
            return Ok(false);
        }

        std::fs::remove_file(&file_path)
            .with_context(|| format!("Unable to delete file {}", file_path.display()))?;

        Ok(true)
    }
}
