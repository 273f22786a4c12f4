use crate::domain::marker::{self, Marker};
use crate::git::CommitInfo;

/// A commit together with its AI classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCommit {
    pub commit: CommitInfo,
    pub marker: Marker,
}

impl ClassifiedCommit {
    /// Classify a commit by decoding the marker in its message
    pub fn classify(commit: CommitInfo) -> Self {
        let marker = marker::decode(&commit.message);
        ClassifiedCommit { commit, marker }
    }

    pub fn is_ai(&self) -> bool {
        self.marker.is_ai()
    }

    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }
}
