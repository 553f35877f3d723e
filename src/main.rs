use crate::areas::repository::Repository;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "Gitlet tracks snapshots of the current directory and lets you \
    navigate, branch, merge, and replicate them across repositories on the same \
    filesystem. It is a learning-scale take on git: single user, single machine, \
    whole-file merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for addition")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(about = "Create a commit from the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(about = "Stage a file for removal and delete it")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(about = "Show the history of the active branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(about = "Print the ids of commits whose message contains the query")]
    Find {
        #[arg(index = 1, help = "The message substring to search for")]
        message: String,
    },
    #[command(about = "Show branches, staged changes, and the working tree state")]
    Status,
    #[command(
        about = "Restore a file or switch to a branch",
        long_about = "Three forms: `checkout -- <file>` restores a file from HEAD, \
        `checkout <commit id> -- <file>` restores it from a commit, and \
        `checkout <branch>` switches the working tree to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name or commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(about = "Create a branch pointing at HEAD")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Move the active branch to a commit and check it out")]
    Reset {
        #[arg(index = 1, help = "The commit id, abbreviations accepted")]
        commit_id: String,
    },
    #[command(about = "Merge a branch into the active branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Record a remote repository's location")]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "Path to the remote repository directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
    },
    #[command(about = "Copy local commits onto a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Copy a remote branch's commits into this repository")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(error),
    };

    let pwd = std::env::current_dir()?;

    if let Commands::Init = cli.command {
        return Repository::initialize(&pwd, Box::new(std::io::stdout()));
    }

    if !Repository::is_initialized(&pwd) {
        println!("Not in an initialized Gitlet directory.");
        return Ok(());
    }

    let mut repository = Repository::load(&pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => {}
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or(""))?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file)?,
            (Some(commit_id), Some(file)) => repository.checkout_file_at(commit_id, file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => println!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit_id } => repository.reset(commit_id)?,
        Commands::Merge { branch } => repository.merge(branch)?,
        Commands::AddRemote { name, path } => repository.add_remote(name, path)?,
        Commands::RmRemote { name } => repository.rm_remote(name)?,
        Commands::Push { remote, branch } => repository.push(remote, branch)?,
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch)?,
        Commands::Pull { remote, branch } => repository.pull(remote, branch)?,
    }

    repository.save()
}

/// Map argument-parsing failures onto the fixed user messages
///
/// Usage mistakes terminate successfully after printing, the same as any
/// other user error.
fn report_usage_error(error: clap::Error) -> Result<()> {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            error.print()?;
        }
        ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("Please enter a command.")
        }
        ErrorKind::InvalidSubcommand => println!("No command with that name exists."),
        _ => println!("Incorrect operands."),
    }

    Ok(())
}
