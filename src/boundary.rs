use std::fmt;

/// Non-fatal conditions met while resolving or scanning a range.
/// These are reported to the user next to the report itself.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The range resolved to no commits at all
    EmptyRange { range: String },
    /// No earlier tag exists, so the tag report covers its full history
    NoPreviousTag { tag: String },
    /// All-branches mode found no base branch to subtract
    BaseBranchMissing { base: String },
    /// HEAD is detached and stood in for the current branch
    DetachedHead,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::EmptyRange { range } => {
                write!(f, "No commits in range '{}'", range)
            }
            BoundaryWarning::NoPreviousTag { tag } => {
                write!(
                    f,
                    "No tag found before '{}'; counting its full history",
                    tag
                )
            }
            BoundaryWarning::BaseBranchMissing { base } => {
                write!(
                    f,
                    "Base branch '{}' not found; each branch counts its full history",
                    base
                )
            }
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached; using HEAD as the branch")
            }
        }
    }
}
