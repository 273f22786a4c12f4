use std::path::Path;
use std::process::ExitCode;

use git_ai::cli::orchestration::{self, Statistics};
use git_ai::cli::{route, Invocation, Operation};
use git_ai::config::{self, Config};
use git_ai::git::{Git2Repository, Repository};
use git_ai::hooks::interceptor;
use git_ai::{ui, GitAiError, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `GIT_AI_LOG=git_ai=debug`
const LOG_ENV: &str = "GIT_AI_LOG";

fn main() -> ExitCode {
    let invocation = match route(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            ui::display_error(&e.to_string());
            eprintln!("Run 'git ai --help' for usage.");
            return ExitCode::from(e.exit_code());
        }
    };

    init_tracing(invocation.verbose);

    match run(&invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(invocation: &Invocation) -> Result<()> {
    let config_path = invocation.config_path.as_deref();

    match &invocation.operation {
        Operation::Help(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        Operation::Hook { message_file } => {
            run_hook(message_file, config_path);
            Ok(())
        }
        Operation::Setup => {
            let repo = Git2Repository::discover(".")?;
            let config = load_config(config_path, &repo)?;
            let installation = orchestration::setup(&repo, &config)?;
            ui::display_installation(&installation);
            Ok(())
        }
        Operation::Report(request) => {
            let repo = Git2Repository::discover(".")?;
            let config = load_config(config_path, &repo)?;

            // everything is resolved before the first line is printed
            let analysis = orchestration::analyze(&repo, &config, request)?;
            for warning in &analysis.warnings {
                ui::display_boundary_warning(warning);
            }

            let recent = config.report.recent_commits;
            match &analysis.statistics {
                Statistics::Range(report) => ui::display_range_report(report, recent),
                Statistics::Compare(report) => ui::display_comparison(report, recent),
                Statistics::AllBranches(report) => ui::display_branch_breakdown(report),
            }
            Ok(())
        }
    }
}

fn load_config<R: Repository>(config_path: Option<&Path>, repo: &R) -> Result<Config> {
    config::load_config(config_path, Some(repo.toplevel()))
        .map_err(|e| GitAiError::config(format!("{:#}", e)))
}

/// Hook entry point: whatever goes wrong, the commit goes ahead
fn run_hook(message_file: &Path, config_path: Option<&Path>) {
    let repo_root = Git2Repository::discover(".")
        .ok()
        .map(|repo| repo.toplevel().to_path_buf());

    let config = match config::load_config(config_path, repo_root.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "ignoring unreadable configuration");
            Config::default()
        }
    };

    let mut prompt = interceptor::hook_prompt();
    orchestration::run_hook(message_file, &config, prompt.as_mut());
}
