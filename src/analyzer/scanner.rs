use crate::domain::{Boundary, ClassifiedCommit, Range};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use std::collections::BTreeMap;
use tracing::debug;

/// Walks commit ranges and classifies every commit it finds
pub struct HistoryScanner<'r, R: Repository> {
    repo: &'r R,
}

impl<'r, R: Repository> HistoryScanner<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        HistoryScanner { repo }
    }

    /// Classified commits in `range`, most recent first
    ///
    /// Both endpoints must resolve; identical endpoints give an empty list.
    pub fn scan(&self, range: &Range) -> Result<Vec<ClassifiedCommit>> {
        let tip = self.repo.resolve(&range.to)?;
        let hide = self.resolve_boundary(&range.from, tip)?;

        let commits = self.scan_oids(hide, tip)?;
        debug!(range = %range, count = commits.len(), "scanned range");
        Ok(commits)
    }

    /// Per-branch histories for every local branch, keyed by branch name
    ///
    /// With a base branch, the base contributes its full history and every
    /// other branch only the commits it does not share with the base. Without
    /// one, every branch contributes its full history.
    pub fn scan_all_branches(
        &self,
        base: Option<&str>,
    ) -> Result<BTreeMap<String, Vec<ClassifiedCommit>>> {
        let base_oid = base.map(|name| self.repo.resolve(name)).transpose()?;
        let mut histories = BTreeMap::new();

        for branch in self.repo.local_branches()? {
            let tip = self.repo.resolve(&branch)?;
            let hide = match (base, base_oid) {
                (Some(base_name), Some(oid)) if base_name != branch => Some(oid),
                _ => None,
            };

            let commits = self.scan_oids(hide, tip)?;
            debug!(branch = %branch, count = commits.len(), "scanned branch");
            histories.insert(branch, commits);
        }

        Ok(histories)
    }

    fn resolve_boundary(&self, boundary: &Boundary, tip: Oid) -> Result<Option<Oid>> {
        match boundary {
            Boundary::Root => Ok(None),
            Boundary::Ref(name) => self.repo.resolve(name).map(Some),
            Boundary::MergeBase(base) => {
                let base_oid = self.repo.resolve(base)?;
                let fork = self.repo.merge_base(tip, base_oid)?;
                debug!(base = %base, merge_base = %fork, "resolved divergence point");
                Ok(Some(fork))
            }
        }
    }

    fn scan_oids(&self, hide: Option<Oid>, tip: Oid) -> Result<Vec<ClassifiedCommit>> {
        if hide == Some(tip) {
            return Ok(Vec::new());
        }

        Ok(self
            .repo
            .commits_between(hide, tip)?
            .into_iter()
            .map(ClassifiedCommit::classify)
            .collect())
    }
}
