use crate::error::{GitAiError, Result};
use crate::git::CommitInfo;
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    toplevel: PathBuf,
}

impl Git2Repository {
    /// Discover the repository enclosing `path`
    ///
    /// Fails with [GitAiError::NotARepository] when no repository is found.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            debug!(path = %path.as_ref().display(), error = %e, "repository discovery failed");
            GitAiError::NotARepository
        })?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let toplevel = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| repo.path().to_path_buf());

        Git2Repository { repo, toplevel }
    }

    fn commit_info(&self, oid: Oid) -> Result<CommitInfo> {
        let commit = self.repo.find_commit(oid)?;
        let author = commit.author();

        Ok(CommitInfo {
            oid,
            hash: oid.to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author: author.name().unwrap_or("unknown").to_string(),
            time: commit.time().seconds(),
            parents: commit.parent_ids().collect(),
        })
    }
}

impl super::Repository for Git2Repository {
    fn toplevel(&self) -> &Path {
        &self.toplevel
    }

    fn hooks_dir(&self) -> Result<PathBuf> {
        match self.repo.config()?.get_path("core.hooksPath") {
            Ok(path) if path.is_absolute() => Ok(path),
            Ok(path) => Ok(self.toplevel.join(path)),
            // linked worktrees share the hooks of the main repository
            Err(e) if e.code() == ErrorCode::NotFound => Ok(self.repo.commondir().join("hooks")),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, reference: &str) -> Result<Oid> {
        if let Ok(branch) = self.repo.find_branch(reference, BranchType::Local) {
            if let Ok(commit) = branch.get().peel_to_commit() {
                return Ok(commit.id());
            }
        }

        if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", reference)) {
            if let Ok(commit) = tag_ref.peel_to_commit() {
                return Ok(commit.id());
            }
        }

        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|e| {
                debug!(reference, error = %e, "reference did not resolve");
                GitAiError::unresolved(reference)
            })
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                return Err(GitAiError::unresolved("HEAD"))
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(None);
        }

        Ok(head.shorthand().map(str::to_string))
    }

    fn commits_between(&self, hide: Option<Oid>, tip: Oid) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(tip)?;

        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(self.commit_info(oid?)?);
        }

        Ok(commits)
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid> {
        self.repo.merge_base(one, two).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitAiError::unresolved(format!("merge-base of {} and {}", one, two))
            } else {
                e.into()
            }
        })
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Tags of trees or blobs have no place in commit history
            if let Ok(commit) = reference.peel_to_commit() {
                tags.push((name.to_string(), commit.id()));
            }
        }

        tags.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(tags)
    }
}
