//! User-facing commands
//!
//! - `init`: Create a repository with its initial commit
//! - `add` / `rm`: Stage additions and removals
//! - `commit`: Snapshot the staging area on top of HEAD
//! - `log` / `find` / `status`: Inspect history and the working tree
//! - `checkout` / `reset`: Restore files and move branches
//! - `branch` / `rm_branch`: Manage branch pointers
//! - `merge`: Three-way merge of another branch into the active one
//! - `remote` / `push` / `fetch` / `pull`: Replicate across repositories

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod pull;
pub mod push;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
