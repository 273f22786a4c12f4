//! Maps the command line to exactly one operation.

use crate::cli::args::Args;
use crate::error::{GitAiError, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// One commit range to report on, before any reference is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeRequest {
    Branch { name: Option<String> },
    Tag { tag: String, previous: Option<String> },
    Feature { branch: Option<String>, base: Option<String> },
    Explicit { from: String, to: String },
}

/// A statistics request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    Range(RangeRequest),
    Compare { base: String, feature: String },
    AllBranches,
}

/// The one thing an invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Report(ReportRequest),
    Setup,
    Hook { message_file: PathBuf },
    /// Rendered help or version text
    Help(String),
}

/// A routed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

/// Parse `argv` (program name first) into an [Invocation].
///
/// Unknown flags, wrong arity and more than one mode flag are all
/// [GitAiError::InvalidArguments].
pub fn route<I, T>(argv: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    if argv.len() <= 1 {
        return Ok(Invocation {
            operation: Operation::Help(Args::command().render_help().to_string()),
            config_path: None,
            verbose: false,
        });
    }

    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Invocation {
                operation: Operation::Help(e.render().to_string()),
                config_path: None,
                verbose: false,
            });
        }
        Err(e) => return Err(GitAiError::invalid_arguments(clap_message(&e))),
    };

    Ok(Invocation {
        operation: operation_from_args(&args)?,
        config_path: args.config.clone(),
        verbose: args.verbose,
    })
}

/// Pick the single operation the parsed flags ask for
pub fn operation_from_args(args: &Args) -> Result<Operation> {
    let mut modes: Vec<(&str, Operation)> = Vec::new();

    if let Some(name) = &args.branch {
        modes.push((
            "--branch",
            Operation::Report(ReportRequest::Range(RangeRequest::Branch {
                name: name.clone(),
            })),
        ));
    }

    if let Some(values) = &args.tag {
        let mut values = values.iter().cloned();
        let tag = values
            .next()
            .ok_or_else(|| GitAiError::invalid_arguments("--tag requires a TAG"))?;
        modes.push((
            "--tag",
            Operation::Report(ReportRequest::Range(RangeRequest::Tag {
                tag,
                previous: values.next(),
            })),
        ));
    }

    if let Some(values) = &args.feature {
        let mut values = values.iter().cloned();
        modes.push((
            "--feature",
            Operation::Report(ReportRequest::Range(RangeRequest::Feature {
                branch: values.next(),
                base: values.next(),
            })),
        ));
    }

    if let Some(values) = &args.compare {
        let [base, feature] = two_values("--compare", "BASE and FEATURE", values)?;
        modes.push((
            "--compare",
            Operation::Report(ReportRequest::Compare { base, feature }),
        ));
    }

    if args.all_branches {
        modes.push(("--all-branches", Operation::Report(ReportRequest::AllBranches)));
    }

    if let Some(values) = &args.range {
        let [from, to] = two_values("--range", "FROM and TO", values)?;
        modes.push((
            "--range",
            Operation::Report(ReportRequest::Range(RangeRequest::Explicit { from, to })),
        ));
    }

    if args.setup {
        modes.push(("--setup", Operation::Setup));
    }

    if let Some(file) = &args.hook {
        modes.push((
            "--hook",
            Operation::Hook {
                message_file: file.clone(),
            },
        ));
    }

    match modes.len() {
        0 => Ok(Operation::Help(Args::command().render_help().to_string())),
        1 => Ok(modes.remove(0).1),
        _ => {
            let flags: Vec<&str> = modes.iter().map(|(flag, _)| *flag).collect();
            Err(GitAiError::invalid_arguments(format!(
                "only one mode may be given, got {}",
                flags.join(", ")
            )))
        }
    }
}

fn two_values(flag: &str, what: &str, values: &[String]) -> Result<[String; 2]> {
    match values {
        [first, second] => Ok([first.clone(), second.clone()]),
        _ => Err(GitAiError::invalid_arguments(format!(
            "{} requires both {}",
            flag, what
        ))),
    }
}

/// First line of clap's rendered error without the `error: ` prefix
fn clap_message(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    let first = rendered.lines().next().unwrap_or("").trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(argv: &[&str]) -> Result<Operation> {
        let mut full = vec!["git-ai"];
        full.extend_from_slice(argv);
        route(full).map(|invocation| invocation.operation)
    }

    #[test]
    fn test_no_arguments_is_help() {
        assert!(matches!(op(&[]).unwrap(), Operation::Help(text) if text.contains("--branch")));
    }

    #[test]
    fn test_help_flag() {
        assert!(matches!(op(&["-h"]).unwrap(), Operation::Help(text) if text.contains("Examples")));
    }

    #[test]
    fn test_branch_with_and_without_name() {
        assert_eq!(
            op(&["-b"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Branch { name: None }))
        );
        assert_eq!(
            op(&["--branch", "feature/login"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Branch {
                name: Some("feature/login".to_string())
            }))
        );
    }

    #[test]
    fn test_tag_with_previous() {
        assert_eq!(
            op(&["-t", "v1.1", "v1.0"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Tag {
                tag: "v1.1".to_string(),
                previous: Some("v1.0".to_string())
            }))
        );
    }

    #[test]
    fn test_tag_requires_name() {
        assert!(matches!(op(&["-t"]), Err(GitAiError::InvalidArguments(_))));
    }

    #[test]
    fn test_feature_arities() {
        assert_eq!(
            op(&["-f"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Feature {
                branch: None,
                base: None
            }))
        );
        assert_eq!(
            op(&["-f", "feature/x", "main"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Feature {
                branch: Some("feature/x".to_string()),
                base: Some("main".to_string())
            }))
        );
    }

    #[test]
    fn test_compare_needs_two_refs() {
        assert!(matches!(op(&["-c", "main"]), Err(GitAiError::InvalidArguments(_))));
        assert_eq!(
            op(&["-c", "main", "feature/x"]).unwrap(),
            Operation::Report(ReportRequest::Compare {
                base: "main".to_string(),
                feature: "feature/x".to_string()
            })
        );
    }

    #[test]
    fn test_range_is_a_single_range_request() {
        assert_eq!(
            op(&["-r", "v1.0", "v2.0"]).unwrap(),
            Operation::Report(ReportRequest::Range(RangeRequest::Explicit {
                from: "v1.0".to_string(),
                to: "v2.0".to_string()
            }))
        );
        assert_eq!(
            op(&["-a"]).unwrap(),
            Operation::Report(ReportRequest::AllBranches)
        );
    }

    #[test]
    fn test_range_needs_two_refs() {
        assert!(matches!(op(&["-r", "v1.0"]), Err(GitAiError::InvalidArguments(_))));
    }

    #[test]
    fn test_modes_are_exclusive() {
        let err = op(&["-a", "-s"]).unwrap_err();
        assert!(matches!(err, GitAiError::InvalidArguments(_)));
        assert!(err.to_string().contains("--all-branches, --setup"));
    }

    #[test]
    fn test_unknown_flag() {
        let err = op(&["--bogus"]).unwrap_err();
        assert!(matches!(err, GitAiError::InvalidArguments(msg) if msg.contains("--bogus")));
    }

    #[test]
    fn test_hook_and_config() {
        let invocation = route([
            "git-ai",
            "--hook",
            ".git/COMMIT_EDITMSG",
            "--config",
            "ai.toml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(
            invocation.operation,
            Operation::Hook {
                message_file: PathBuf::from(".git/COMMIT_EDITMSG")
            }
        );
        assert_eq!(invocation.config_path, Some(PathBuf::from("ai.toml")));
        assert!(invocation.verbose);
    }

    #[test]
    fn test_options_without_mode_is_help() {
        assert!(matches!(op(&["--verbose"]).unwrap(), Operation::Help(_)));
    }
}
