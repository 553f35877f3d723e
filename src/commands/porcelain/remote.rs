use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Record a remote name pointing at another repository's directory
    ///
    /// Forward slashes in the path are normalized to the platform
    /// separator before storing.
    pub fn add_remote(&mut self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        if self.refs().contains_remote(remote_name) {
            writeln!(self.writer(), "A remote with that name already exists.")?;
            return Ok(());
        }

        let normalized = remote_path.replace('/', std::path::MAIN_SEPARATOR_STR);
        self.refs_mut()
            .add_remote(remote_name.to_string(), normalized);

        Ok(())
    }

    /// Forget a remote name
    pub fn rm_remote(&mut self, remote_name: &str) -> anyhow::Result<()> {
        if self.refs_mut().remove_remote(remote_name).is_none() {
            writeln!(self.writer(), "A remote with that name does not exist.")?;
        }

        Ok(())
    }
}

/// Copy one commit and the blobs it references between repositories
///
/// Serialization is deterministic, so the stored digests are identical on
/// both sides and re-copying is a no-op.
pub(crate) fn transfer_commit(
    source: &Repository,
    destination: &mut Repository,
    oid: &ObjectId,
) -> anyhow::Result<()> {
    let commit = source.database().load_commit(oid)?;

    for blob_oid in commit.tracked().values() {
        let blob = source.database().load_blob(blob_oid)?;
        destination.database().store_blob(&blob)?;
    }

    destination.database().store_commit(&commit)?;
    destination.history_mut().record(oid.clone(), commit.summary());

    Ok(())
}
