use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;

mod common;

use common::command::{head_commit_id, init_repository, run_gitlet_command, stage_and_commit};
use common::file::{read_file, write_file, FileSpec};

#[test]
fn checkout_restores_the_head_and_older_versions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "wug.txt", "hello\n", "added wug");
    let first_commit = head_commit_id(dir.path());

    stage_and_commit(dir.path(), "wug.txt", "goodbye\n", "changed");

    // scribble over the working copy, then restore from HEAD
    write_file(FileSpec::new(dir.path().join("wug.txt"), "scratch".to_string()));
    run_gitlet_command(dir.path(), &["checkout", "--", "wug.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("wug.txt")), "goodbye\n");

    // restore the version tracked by the first commit
    run_gitlet_command(dir.path(), &["checkout", &first_commit, "--", "wug.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("wug.txt")), "hello\n");

    Ok(())
}

#[test]
fn checkout_accepts_an_abbreviated_commit_id() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "wug.txt", "hello\n", "added wug");
    let first_commit = head_commit_id(dir.path());
    stage_and_commit(dir.path(), "wug.txt", "goodbye\n", "changed");

    run_gitlet_command(dir.path(), &["checkout", &first_commit[..8], "--", "wug.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("wug.txt")), "hello\n");

    Ok(())
}

#[test]
fn checkout_reports_files_absent_from_the_commit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());
    stage_and_commit(dir.path(), "wug.txt", "hello\n", "added wug");

    run_gitlet_command(dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));

    Ok(())
}

#[test]
fn checkout_reports_unknown_commit_ids() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());
    stage_and_commit(dir.path(), "wug.txt", "hello\n", "added wug");

    run_gitlet_command(
        dir.path(),
        &["checkout", &"0".repeat(40), "--", "wug.txt"],
    )
    .assert()
    .success()
    .stdout(predicate::eq("No commit with that id exists.\n"));

    Ok(())
}

#[test]
fn checkout_reports_unknown_branches_and_the_current_branch()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success()
        .stdout(predicate::eq("No such branch exists.\n"));

    run_gitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("No need to checkout the current branch.\n"));

    Ok(())
}

#[test]
fn switching_branches_reconciles_the_working_tree() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "a.txt", "A", "a");
    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();

    stage_and_commit(dir.path(), "b.txt", "B", "b");

    // side predates b.txt: switching there removes it
    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("a.txt")), "A");
    assert!(!dir.path().join("b.txt").exists());

    // and switching back brings it back
    run_gitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("b.txt")), "B");

    Ok(())
}

#[test]
fn reset_moves_the_branch_and_reconciles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "a.txt", "A", "a");
    let first_commit = head_commit_id(dir.path());
    stage_and_commit(dir.path(), "b.txt", "B", "b");

    run_gitlet_command(dir.path(), &["reset", &first_commit])
        .assert()
        .success();

    assert!(!dir.path().join("b.txt").exists());
    assert_eq!(head_commit_id(dir.path()), first_commit);

    Ok(())
}

#[test]
fn reset_reports_unknown_commit_ids() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    run_gitlet_command(dir.path(), &["reset", &"f".repeat(40)])
        .assert()
        .success()
        .stdout(predicate::eq("No commit with that id exists.\n"));

    Ok(())
}

#[test]
fn reset_clears_the_staging_area() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "a.txt", "A", "a");
    let first_commit = head_commit_id(dir.path());
    stage_and_commit(dir.path(), "b.txt", "B", "b");

    write_file(FileSpec::new(dir.path().join("c.txt"), "C".to_string()));
    run_gitlet_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["reset", &first_commit])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}
