use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  git ai -b                              # AI commits in current branch
  git ai -b feature/new-login            # AI commits in specific branch
  git ai -f                              # AI commits since current branch left main
  git ai -f feature/new-login develop    # AI commits since branch creation from develop
  git ai -c main feature/new-login       # Compare feature branch with main
  git ai -t v2.0.3                       # AI commits since the tag before v2.0.3
  git ai -t v2.0.3 v2.0.2                # AI commits between two tags
  git ai -r v1.0.0 v2.0.0                # AI commits between two versions
  git ai -a                              # AI stats for all branches
  git ai -s                              # Set up AI tracking in current repo

Setup:
  Run 'git ai -s' in any repository to install the commit hook that asks
  whether a commit was written with AI. AI commits get an [AI] subject prefix.";

/// Command line surface. Exactly one mode flag may be given.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "git-ai",
    version,
    about = "Track AI-assisted commits across branches, tags and ranges",
    after_help = EXAMPLES
)]
pub struct Args {
    #[arg(
        short = 'b',
        long = "branch",
        num_args = 0..=1,
        value_name = "BRANCH",
        help = "AI commits in a branch (current branch if omitted)"
    )]
    pub branch: Option<Option<String>>,

    #[arg(
        short = 't',
        long = "tag",
        num_args = 1..=2,
        value_names = ["TAG", "PREV_TAG"],
        help = "AI commits in a tag since the previous tag"
    )]
    pub tag: Option<Vec<String>>,

    #[arg(
        short = 'f',
        long = "feature",
        num_args = 0..=2,
        value_names = ["BRANCH", "BASE"],
        help = "AI commits since a branch diverged from its base"
    )]
    pub feature: Option<Vec<String>>,

    #[arg(
        short = 'c',
        long = "compare",
        num_args = 2,
        value_names = ["BASE", "FEATURE"],
        help = "Compare AI commits between base and feature branch"
    )]
    pub compare: Option<Vec<String>>,

    #[arg(short = 'a', long = "all-branches", help = "AI stats for all local branches")]
    pub all_branches: bool,

    #[arg(
        short = 'r',
        long = "range",
        num_args = 2,
        value_names = ["FROM", "TO"],
        help = "AI commits between two commits, tags or branches"
    )]
    pub range: Option<Vec<String>>,

    #[arg(short = 's', long = "setup", help = "Install AI tracking hooks in this repository")]
    pub setup: bool,

    /// Entry point for the commit-msg hook
    #[arg(long = "hook", value_name = "MSG_FILE", hide = true)]
    pub hook: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log debug output to stderr")]
    pub verbose: bool,
}
