//! Main workflow orchestration logic
//!
//! Turns a routed [ReportRequest] into finished statistics: omitted arguments
//! are filled in from the repository and configuration, ranges are scanned
//! and reduced, and non-fatal findings are collected as warnings. Nothing is
//! printed here, so a failure never leaves a half-written report behind.

use std::collections::HashMap;
use std::path::Path;

use git2::Oid;
use tracing::{debug, info};

use crate::analyzer::{self, BranchBreakdown, Comparison, HistoryScanner, Report};
use crate::boundary::BoundaryWarning;
use crate::cli::router::{RangeRequest, ReportRequest};
use crate::config::Config;
use crate::domain::{ClassifiedCommit, Range};
use crate::error::Result;
use crate::git::Repository;
use crate::hooks::interceptor::{self, Outcome, Prompt};
use crate::hooks::{HookInstaller, Installation, TemplateSource};

/// Base branch used when none is configured, in order of preference
pub const BASE_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// Report over a single range
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReport {
    pub range: Range,
    pub commits: Vec<ClassifiedCommit>,
    pub report: Report,
}

/// Base against feature
#[derive(Debug, Clone, PartialEq)]
pub struct CompareReport {
    pub base: String,
    pub feature: String,
    pub comparison: Comparison,
}

/// Every local branch
#[derive(Debug, Clone, PartialEq)]
pub struct BranchesReport {
    pub base: Option<String>,
    pub breakdown: BranchBreakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statistics {
    Range(RangeReport),
    Compare(CompareReport),
    AllBranches(BranchesReport),
}

/// Statistics plus the warnings met while computing them
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub statistics: Statistics,
    pub warnings: Vec<BoundaryWarning>,
}

/// Resolve, scan and aggregate one report request
pub fn analyze<R: Repository>(repo: &R, config: &Config, request: &ReportRequest) -> Result<Analysis> {
    let mut warnings = Vec::new();
    let scanner = HistoryScanner::new(repo);

    let statistics = match request {
        ReportRequest::Compare { base, feature } => {
            let base_commits = scanner.scan(&Range::branch(base.as_str()))?;
            let feature_commits = scanner.scan(&Range::branch(feature.as_str()))?;
            let comparison = analyzer::compare(&base_commits, &feature_commits);

            if comparison.exclusive.total == 0 {
                warnings.push(BoundaryWarning::EmptyRange {
                    range: format!("{}..{}", base, feature),
                });
            }

            Statistics::Compare(CompareReport {
                base: base.clone(),
                feature: feature.clone(),
                comparison,
            })
        }
        ReportRequest::AllBranches => {
            let base = match detect_base(repo, config)? {
                Some(base) if repo.local_branches()?.contains(&base) => Some(base),
                other => {
                    warnings.push(BoundaryWarning::BaseBranchMissing {
                        base: other.unwrap_or_else(|| BASE_BRANCH_CANDIDATES[0].to_string()),
                    });
                    None
                }
            };

            let histories = scanner.scan_all_branches(base.as_deref())?;
            Statistics::AllBranches(BranchesReport {
                base,
                breakdown: analyzer::breakdown(&histories),
            })
        }
        ReportRequest::Range(request) => {
            let range = resolve_range(repo, config, request, &mut warnings)?;
            let commits = scanner.scan(&range)?;
            let report = analyzer::aggregate(&commits);

            if commits.is_empty() {
                warnings.push(BoundaryWarning::EmptyRange {
                    range: range.to_string(),
                });
            }

            Statistics::Range(RangeReport {
                range,
                commits,
                report,
            })
        }
    };

    debug!(warnings = warnings.len(), "analysis complete");
    Ok(Analysis {
        statistics,
        warnings,
    })
}

/// Fill in the defaults of a single-range request
fn resolve_range<R: Repository>(
    repo: &R,
    config: &Config,
    request: &RangeRequest,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<Range> {
    let range = match request {
        RangeRequest::Branch { name } => {
            let name = match name {
                Some(name) => name.clone(),
                None => current_branch_or_head(repo, warnings)?,
            };
            Range::branch(name)
        }
        RangeRequest::Tag { tag, previous } => {
            let previous = match previous {
                Some(previous) => Some(previous.clone()),
                None => {
                    let found = previous_tag(repo, tag)?;
                    if found.is_none() {
                        warnings.push(BoundaryWarning::NoPreviousTag { tag: tag.clone() });
                    }
                    found
                }
            };
            Range::tag(tag.as_str(), previous)
        }
        RangeRequest::Feature { branch, base } => {
            let branch = match branch {
                Some(branch) => branch.clone(),
                None => current_branch_or_head(repo, warnings)?,
            };
            let base = match base {
                Some(base) => base.clone(),
                None => detect_base(repo, config)?
                    .unwrap_or_else(|| BASE_BRANCH_CANDIDATES[0].to_string()),
            };
            Range::feature(branch, base)
        }
        RangeRequest::Explicit { from, to } => Range::explicit(from.as_str(), to.as_str()),
    };

    debug!(range = %range, mode = ?range.mode, "resolved range");
    Ok(range)
}

fn current_branch_or_head<R: Repository>(
    repo: &R,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<String> {
    match repo.current_branch()? {
        Some(branch) => Ok(branch),
        None => {
            warnings.push(BoundaryWarning::DetachedHead);
            Ok("HEAD".to_string())
        }
    }
}

/// Configured base branch, else the first of `main`/`master` that exists
pub fn detect_base<R: Repository>(repo: &R, config: &Config) -> Result<Option<String>> {
    if let Some(base) = &config.branches.base {
        return Ok(Some(base.clone()));
    }

    let branches = repo.local_branches()?;
    Ok(BASE_BRANCH_CANDIDATES
        .iter()
        .find(|candidate| branches.iter().any(|b| b == *candidate))
        .map(|candidate| candidate.to_string()))
}

/// Nearest tag in the history of `tag`, not counting `tag`'s own commit
pub fn previous_tag<R: Repository>(repo: &R, tag: &str) -> Result<Option<String>> {
    let tip = repo.resolve(tag)?;

    let mut tags_by_commit: HashMap<Oid, Vec<String>> = HashMap::new();
    for (name, oid) in repo.tags()? {
        tags_by_commit.entry(oid).or_default().push(name);
    }

    for commit in repo.commits_between(None, tip)? {
        if commit.oid == tip {
            continue;
        }
        if let Some(names) = tags_by_commit.get(&commit.oid) {
            debug!(tag, previous = %names[0], "found previous tag");
            return Ok(names.first().cloned());
        }
    }

    Ok(None)
}

/// Install the hook scripts into the repository's hook directory
pub fn setup<R: Repository>(repo: &R, config: &Config) -> Result<Installation> {
    let source = match &config.setup.templates_dir {
        Some(dir) => TemplateSource::Directory(dir.clone()),
        None => TemplateSource::Builtin,
    };

    let hooks_dir = repo.hooks_dir()?;
    info!(repo = %repo.toplevel().display(), hooks = %hooks_dir.display(), "installing hooks");
    HookInstaller::new(hooks_dir, source).install()
}

/// Run the commit-msg interception. Never fails.
pub fn run_hook(message_file: &Path, config: &Config, prompt: &mut dyn Prompt) -> Outcome {
    let outcome = interceptor::intercept(message_file, prompt, &config.hook.question);
    info!(file = %message_file.display(), ?outcome, "commit message processed");
    outcome
}
