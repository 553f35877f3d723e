use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::commands::porcelain::remote::transfer_commit;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Copy local history onto a remote branch
    ///
    /// The remote tip must already be in local history (local history is a
    /// superset); otherwise the push is rejected. Commits on the local
    /// first-parent chain from the remote tip (exclusive) up to local HEAD
    /// (inclusive) are copied oldest-first, then the remote branch is
    /// advanced — through the remote's reset logic when it is the remote's
    /// active branch, as a plain pointer move otherwise.
    pub fn push(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote_path = self.refs().remote_path(remote_name).map(PathBuf::from);
        let remote_path = match remote_path {
            Some(path) if path.is_dir() => path,
            _ => {
                writeln!(self.writer(), "Remote directory not found.")?;
                return Ok(());
            }
        };

        let mut remote = Repository::open_remote(&remote_path)?;

        // a branch the remote does not have yet starts at the remote HEAD
        let target = remote
            .refs()
            .branch_tip(branch_name)
            .cloned()
            .unwrap_or_else(|| remote.refs().head().clone());

        if !self.history().contains(&target) {
            writeln!(
                self.writer(),
                "Please pull down remote changes before pushing."
            )?;
            return Ok(());
        }

        let mut chain = Vec::new();
        for (oid, _) in RevList::new(self.history(), self.refs().head().clone()) {
            if oid == target {
                break;
            }
            chain.push(oid);
        }

        for oid in chain.into_iter().rev() {
            transfer_commit(self, &mut remote, &oid)?;
        }

        let local_head = self.refs().head().clone();
        if remote.refs().active_branch() == branch_name {
            remote.reset_to(&local_head)?;
        } else {
            remote
                .refs_mut()
                .set_branch(branch_name.to_string(), local_head);
        }

        remote.save()
    }
}
