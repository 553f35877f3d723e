use crate::areas::repository::Repository;

impl Repository {
    /// Fetch a remote branch, then merge it into the active branch
    pub fn pull(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        if !self.fetch_branch(remote_name, branch_name)? {
            return Ok(());
        }

        let local_branch = format!("{}/{}", remote_name, branch_name);
        self.merge(&local_branch)
    }
}
