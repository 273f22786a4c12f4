use crate::domain::ClassifiedCommit;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// AI share of a set of commits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub total: usize,
    pub ai_count: usize,
}

impl Report {
    pub fn new(total: usize, ai_count: usize) -> Self {
        Report { total, ai_count }
    }

    /// Percentage in hundredths, rounded half up; 0 for an empty report
    pub fn percentage_hundredths(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let ai = self.ai_count as u64;
        let total = self.total as u64;
        (ai * 10_000 * 2 + total) / (2 * total)
    }

    /// Percentage of AI commits, rounded to two decimals
    pub fn percentage(&self) -> f64 {
        self.percentage_hundredths() as f64 / 100.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.percentage_hundredths();
        write!(
            f,
            "{} of {} commits by AI ({}.{:02}%)",
            self.ai_count,
            self.total,
            hundredths / 100,
            hundredths % 100
        )
    }
}

/// Base and feature side of a comparison, plus what only the feature has
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub base: Report,
    pub feature: Report,
    pub exclusive: Report,
    pub exclusive_commits: Vec<ClassifiedCommit>,
}

/// One report per branch plus the combined picture
#[derive(Debug, Clone, PartialEq)]
pub struct BranchBreakdown {
    /// In branch-name order
    pub branches: Vec<(String, Report)>,
    /// Over the union of all branches, each commit counted once
    pub combined: Report,
}

/// Count commits and AI commits
pub fn aggregate(commits: &[ClassifiedCommit]) -> Report {
    Report {
        total: commits.len(),
        ai_count: commits.iter().filter(|c| c.is_ai()).count(),
    }
}

/// Compare a base history with a feature history
///
/// Feature commits already present in the base are left out of the
/// exclusive side.
pub fn compare(base: &[ClassifiedCommit], feature: &[ClassifiedCommit]) -> Comparison {
    let base_hashes: HashSet<&str> = base.iter().map(|c| c.commit.hash.as_str()).collect();
    let exclusive_commits: Vec<ClassifiedCommit> = feature
        .iter()
        .filter(|c| !base_hashes.contains(c.commit.hash.as_str()))
        .cloned()
        .collect();

    Comparison {
        base: aggregate(base),
        feature: aggregate(feature),
        exclusive: aggregate(&exclusive_commits),
        exclusive_commits,
    }
}

/// Reduce per-branch histories to a breakdown
pub fn breakdown(histories: &BTreeMap<String, Vec<ClassifiedCommit>>) -> BranchBreakdown {
    let branches = histories
        .iter()
        .map(|(name, commits)| (name.clone(), aggregate(commits)))
        .collect();

    let mut seen = HashSet::new();
    let mut combined = Report::default();
    for commit in histories.values().flatten() {
        if seen.insert(commit.commit.hash.as_str()) {
            combined.total += 1;
            if commit.is_ai() {
                combined.ai_count += 1;
            }
        }
    }

    BranchBreakdown { branches, combined }
}
