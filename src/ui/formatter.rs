//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build plain strings and are unit tested; the
//! `display_*` functions add colour through `console` and print. Reports go to
//! stdout, warnings and errors to stderr.

use chrono::DateTime;
use console::style;

use crate::analyzer::Report;
use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{BranchesReport, CompareReport, RangeReport};
use crate::domain::ClassifiedCommit;
use crate::hooks::Installation;

/// Subjects longer than this are cut in commit listings
pub const SUBJECT_WIDTH: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Cut a subject to [SUBJECT_WIDTH] characters, marking the cut with `...`
pub fn truncate_subject(subject: &str) -> String {
    if subject.chars().count() <= SUBJECT_WIDTH {
        return subject.to_string();
    }
    let cut: String = subject.chars().take(SUBJECT_WIDTH - 3).collect();
    format!("{}...", cut)
}

/// `abc1234  2024-05-01  [AI] subject`
pub fn format_commit_line(commit: &ClassifiedCommit) -> String {
    let date = DateTime::from_timestamp(commit.commit.time, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());

    format!(
        "{}  {}  {}",
        commit.commit.short_hash(),
        date,
        truncate_subject(commit.subject())
    )
}

/// `label: 2 of 3 commits by AI (66.67%)`
pub fn format_report_line(label: &str, report: &Report) -> String {
    format!("{}: {}", label, report)
}

/// AI commits to list, most recent first, plus how many were left out
pub fn listed_ai_commits(commits: &[ClassifiedCommit], limit: usize) -> (Vec<String>, usize) {
    let ai: Vec<&ClassifiedCommit> = commits.iter().filter(|c| c.is_ai()).collect();
    let shown = ai.iter().take(limit).map(|c| format_commit_line(c)).collect();
    (shown, ai.len().saturating_sub(limit))
}

fn display_ai_commits(commits: &[ClassifiedCommit], limit: usize) {
    let (lines, more) = listed_ai_commits(commits, limit);
    if lines.is_empty() {
        return;
    }

    println!("\n{}", style("AI commits:").underlined());
    for line in lines {
        println!("  {}", line);
    }
    if more > 0 {
        println!("  ... and {} more", more);
    }
}

/// Report over one range, followed by its most recent AI commits
pub fn display_range_report(report: &RangeReport, recent_commits: usize) {
    println!(
        "\n{}",
        style(format!("AI commits in {}", report.range)).bold()
    );
    println!("  {}", format_report_line("Total", &report.report));
    display_ai_commits(&report.commits, recent_commits);
}

/// Base against feature, with the feature's own commits broken out
pub fn display_comparison(report: &CompareReport, recent_commits: usize) {
    let comparison = &report.comparison;
    println!(
        "\n{}",
        style(format!("Comparing {} with {}", report.feature, report.base)).bold()
    );
    println!("  {}", format_report_line(&report.base, &comparison.base));
    println!("  {}", format_report_line(&report.feature, &comparison.feature));
    println!(
        "  {}",
        style(format_report_line(
            &format!("Only in {}", report.feature),
            &comparison.exclusive
        ))
        .cyan()
    );
    display_ai_commits(&comparison.exclusive_commits, recent_commits);
}

/// One line per local branch plus the combined total
pub fn display_branch_breakdown(report: &BranchesReport) {
    let title = match &report.base {
        Some(base) => format!("AI commits per branch (relative to {})", base),
        None => "AI commits per branch".to_string(),
    };
    println!("\n{}", style(title).bold());

    let width = report
        .breakdown
        .branches
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    for (name, branch_report) in &report.breakdown.branches {
        let marker = if report.base.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {:width$}  {}", marker, name, branch_report, width = width);
    }

    println!(
        "\n  {}",
        style(format_report_line("All branches", &report.breakdown.combined)).bold()
    );
}

/// Files written by `--setup`
pub fn display_installation(installation: &Installation) {
    for path in &installation.installed {
        display_success(&format!("Installed {}", path.display()));
    }
    println!(
        "\n{} AI tracking is set up in {}",
        style("✓").green(),
        style(installation.hooks_dir.display()).cyan()
    );
    println!("  Every commit will now ask whether it was written with AI.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::fake_oid;
    use crate::git::CommitInfo;

    fn classified(seed: u32, message: &str, time: i64) -> ClassifiedCommit {
        let oid = fake_oid(seed);
        ClassifiedCommit::classify(CommitInfo {
            oid,
            hash: oid.to_string(),
            message: message.to_string(),
            author: "Test Author".to_string(),
            time,
            parents: Vec::new(),
        })
    }

    #[test]
    fn test_truncate_subject() {
        assert_eq!(truncate_subject("short"), "short");
        let long = "x".repeat(80);
        let cut = truncate_subject(&long);
        assert_eq!(cut.chars().count(), SUBJECT_WIDTH);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_subject_multibyte() {
        let long = "é".repeat(70);
        assert_eq!(truncate_subject(&long).chars().count(), SUBJECT_WIDTH);
    }

    #[test]
    fn test_format_commit_line() {
        // 2024-05-01T12:00:00Z
        let commit = classified(1, "[AI] add parser\n\nbody", 1_714_564_800);
        let line = format_commit_line(&commit);
        assert_eq!(
            line,
            format!("{}  2024-05-01  [AI] add parser", commit.commit.short_hash())
        );
    }

    #[test]
    fn test_format_report_line() {
        assert_eq!(
            format_report_line("main", &Report::new(2, 1)),
            "main: 1 of 2 commits by AI (50.00%)"
        );
    }

    #[test]
    fn test_listed_ai_commits_limit() {
        let commits = vec![
            classified(1, "[AI] one", 30),
            classified(2, "two", 20),
            classified(3, "[AI] three", 10),
            classified(4, "[AI] four", 5),
        ];

        let (lines, more) = listed_ai_commits(&commits, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[AI] one"));
        assert!(lines[1].ends_with("[AI] three"));
        assert_eq!(more, 1);

        let (lines, more) = listed_ai_commits(&commits, 10);
        assert_eq!(lines.len(), 3);
        assert_eq!(more, 0);
    }
}
