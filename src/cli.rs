use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "oca-port")]
#[command(
    about = "Migrate ADDON from FROM_BRANCH to TO_BRANCH, or list the commits to port if ADDON already exists on TO_BRANCH",
    long_about = "Migrate ADDON from FROM_BRANCH to TO_BRANCH or list Pull Requests to port \
if ADDON already exists on TO_BRANCH.\n\n\
The commits to port are the FROM_BRANCH commits that do not exist in TO_BRANCH.\n\n\
Give the --fork option to prepare the branch that will be pushed on your remote."
)]
pub struct CliArgs {
    /// Source branch, e.g. 13.0 or origin/13.0
    pub from_branch: String,

    /// Target branch, e.g. 14.0 or a local migration branch
    pub to_branch: String,

    /// Addon (top-level directory) to migrate or port
    pub addon: String,

    /// Upstream organization name [default: OCA]
    #[arg(long)]
    pub upstream_org: Option<String>,

    /// Git remote from which source and target branches are fetched by default [default: origin]
    #[arg(long)]
    pub upstream: Option<String>,

    /// Repository name, e.g. server-tools [default: current directory name]
    #[arg(long)]
    pub repo_name: Option<String>,

    /// Git remote where branches with ported commits are pushed
    #[arg(long)]
    pub fork: Option<String>,

    /// User organization name [default: value of --fork]
    #[arg(long)]
    pub user_org: Option<String>,

    /// List the fetched branches and the commits of Pull Requests
    #[arg(long)]
    pub verbose: bool,

    /// Disable all interactive prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
