use assert_fs::TempDir;
use predicates::prelude::predicate;

mod common;

use common::command::{init_repository, run_gitlet_command, stage_and_commit};
use common::file::{write_file, FileSpec};

#[test]
fn fresh_repository_status_shows_only_master() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "=== Branches ===\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             \n\
             === Removed Files ===\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             \n\
             === Untracked Files ===\n\
             \n",
        ));

    Ok(())
}

#[test]
fn status_reports_every_section() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    stage_and_commit(dir.path(), "a.txt", "A\n", "base a");
    stage_and_commit(dir.path(), "b.txt", "B\n", "base b");
    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();

    // staged addition
    write_file(FileSpec::new(dir.path().join("d.txt"), "D\n".to_string()));
    run_gitlet_command(dir.path(), &["add", "d.txt"])
        .assert()
        .success();

    // staged removal
    run_gitlet_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();

    // unstaged modification and an untracked file
    write_file(FileSpec::new(dir.path().join("a.txt"), "changed\n".to_string()));
    write_file(FileSpec::new(dir.path().join("u.txt"), "U\n".to_string()));

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "=== Branches ===\n\
             *master\n\
             side\n\
             \n\
             === Staged Files ===\n\
             d.txt\n\
             \n\
             === Removed Files ===\n\
             b.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             a.txt (modified)\n\
             \n\
             === Untracked Files ===\n\
             u.txt\n\
             \n",
        ));

    Ok(())
}

#[test]
fn status_flags_deleted_tracked_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());
    stage_and_commit(dir.path(), "a.txt", "A\n", "base");

    std::fs::remove_file(dir.path().join("a.txt"))?;

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\na.txt (deleted)\n",
        ));

    Ok(())
}

#[test]
fn status_flags_deleted_staged_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    init_repository(dir.path());

    write_file(FileSpec::new(dir.path().join("new.txt"), "N\n".to_string()));
    run_gitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    std::fs::remove_file(dir.path().join("new.txt"))?;

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\nnew.txt (deleted)\n",
        ));

    Ok(())
}
