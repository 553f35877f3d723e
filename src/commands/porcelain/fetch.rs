use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::commands::porcelain::remote::transfer_commit;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Copy a remote branch's history into the local repository
    pub fn fetch(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.fetch_branch(remote_name, branch_name)?;
        Ok(())
    }

    /// Fetch a remote branch, reporting whether the tracking branch moved
    ///
    /// Copies the commits on the remote branch's first-parent chain that
    /// local history is missing, plus their blobs, then points the local
    /// branch `remote/branch` at the fetched tip.
    pub(crate) fn fetch_branch(
        &mut self,
        remote_name: &str,
        branch_name: &str,
    ) -> anyhow::Result<bool> {
        let remote_path = self.refs().remote_path(remote_name).map(PathBuf::from);
        let remote_path = match remote_path {
            Some(path) if path.is_dir() => path,
            _ => {
                writeln!(self.writer(), "Remote directory not found.")?;
                return Ok(false);
            }
        };

        let remote = Repository::open_remote(&remote_path)?;

        let Some(tip) = remote.refs().branch_tip(branch_name).cloned() else {
            writeln!(self.writer(), "That remote does not have that branch.")?;
            return Ok(false);
        };

        let mut missing = Vec::new();
        for (oid, _) in RevList::new(remote.history(), tip.clone()) {
            if self.history().contains(&oid) {
                break;
            }
            missing.push(oid);
        }

        for oid in missing.into_iter().rev() {
            transfer_commit(&remote, self, &oid)?;
        }

        let local_branch = format!("{}/{}", remote_name, branch_name);
        self.refs_mut().set_branch(local_branch, tip);

        Ok(true)
    }
}
