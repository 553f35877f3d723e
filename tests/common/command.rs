use assert_cmd::Command;
use std::path::Path;

use crate::common::file::{write_file, FileSpec};

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn init_repository(dir: &Path) {
    run_gitlet_command(dir, &["init"]).assert().success();
}

/// Write a file, stage it, and commit it in one step
pub fn stage_and_commit(dir: &Path, file_name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file_name), content.to_string()));
    run_gitlet_command(dir, &["add", file_name]).assert().success();
    run_gitlet_command(dir, &["commit", message])
        .assert()
        .success();
}

/// The commit ids on the active branch, newest first, parsed from `log`
pub fn commit_ids_from_log(dir: &Path) -> Vec<String> {
    let output = run_gitlet_command(dir, &["log"]).output().expect("log failed");
    let stdout = String::from_utf8(output.stdout).expect("log output is not UTF-8");

    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

/// The id of the commit HEAD points at
pub fn head_commit_id(dir: &Path) -> String {
    commit_ids_from_log(dir)
        .into_iter()
        .next()
        .expect("log printed no commits")
}
