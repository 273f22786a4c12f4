//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! queries git-ai needs, so the scanner and aggregation engine can run
//! against a real repository or against in-memory history in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_ai::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tip = repo.resolve("main")?;
//! let commits = repo.commits_between(None, tip)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::{Path, PathBuf};

/// Commit information read from history
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    pub oid: Oid,
    /// Full hex hash
    pub hash: String,
    pub message: String,
    pub author: String,
    /// Commit time in seconds since the epoch
    pub time: i64,
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(7);
        &self.hash[..end]
    }
}

/// The git queries git-ai depends on
///
/// ## Error Handling
///
/// Lookups of names that do not exist must fail with
/// [crate::error::GitAiError::UnresolvedReference]; other failures map the
/// underlying error into [crate::error::GitAiError].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): real repository via `git2`
/// - [MockRepository](mock::MockRepository): in-memory commit graph
pub trait Repository {
    /// Top-level directory of the working tree
    fn toplevel(&self) -> &Path;

    /// Directory git runs hooks from
    fn hooks_dir(&self) -> Result<PathBuf>;

    /// Resolve a branch, tag or revision to a commit
    ///
    /// Local branches win over tags of the same name, then anything git's
    /// revision syntax understands (hashes, `HEAD~2`, remote branches).
    fn resolve(&self, reference: &str) -> Result<Oid>;

    /// Name of the checked-out branch, or `None` on a detached HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Commits reachable from `tip` and not from `hide`, most recent first
    ///
    /// # Arguments
    /// * `hide` - Lower boundary (exclusive, along with all its ancestors);
    ///   `None` walks the whole history of `tip`
    /// * `tip` - Upper boundary (inclusive)
    fn commits_between(&self, hide: Option<Oid>, tip: Oid) -> Result<Vec<CommitInfo>>;

    /// Most recent common ancestor of two commits
    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid>;

    /// Names of all local branches, sorted
    fn local_branches(&self) -> Result<Vec<String>>;

    /// All tags with the commit each one points at, sorted by name
    fn tags(&self) -> Result<Vec<(String, Oid)>>;
}
