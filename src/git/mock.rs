use crate::error::{GitAiError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory commit graph for testing without a real repository
pub struct MockRepository {
    toplevel: PathBuf,
    commits: HashMap<Oid, CommitInfo>,
    tags: BTreeMap<String, Oid>,
    branch_heads: BTreeMap<String, Oid>,
    current_branch: Option<String>,
    detached_head: Option<Oid>,
    next_seed: u32,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            toplevel: PathBuf::from("/mock/repo"),
            commits: HashMap::new(),
            tags: BTreeMap::new(),
            branch_heads: BTreeMap::new(),
            current_branch: None,
            detached_head: None,
            next_seed: 1,
        }
    }

    /// Record a commit with the given parents and return its id
    ///
    /// Commit times increase with every call so history order is predictable.
    pub fn commit(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let seed = self.next_seed;
        self.next_seed += 1;
        let oid = fake_oid(seed);

        self.add_commit(CommitInfo {
            oid,
            hash: oid.to_string(),
            message: message.to_string(),
            author: "Mock Author".to_string(),
            time: 1_700_000_000 + i64::from(seed) * 60,
            parents: parents.to_vec(),
        });

        oid
    }

    /// Add a fully specified commit
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.commits.insert(info.oid, info);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Check out a branch; `None` detaches HEAD
    pub fn set_current_branch(&mut self, branch: Option<&str>) {
        self.current_branch = branch.map(str::to_string);
    }

    /// Point HEAD straight at a commit
    pub fn detach_head(&mut self, oid: Oid) {
        self.current_branch = None;
        self.detached_head = Some(oid);
    }

    fn ancestors(&self, start: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];

        while let Some(oid) = stack.pop() {
            if !seen.insert(oid) {
                continue;
            }
            if let Some(info) = self.commits.get(&oid) {
                stack.extend(info.parents.iter().copied());
            }
        }

        seen
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic, distinct object id for a seed
pub fn fake_oid(seed: u32) -> Oid {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&seed.to_be_bytes());
    bytes[19] = 0xa1;
    Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
}

impl Repository for MockRepository {
    fn toplevel(&self) -> &Path {
        &self.toplevel
    }

    fn hooks_dir(&self) -> Result<PathBuf> {
        Ok(self.toplevel.join(".git").join("hooks"))
    }

    fn resolve(&self, reference: &str) -> Result<Oid> {
        if let Some(oid) = self.branch_heads.get(reference) {
            return Ok(*oid);
        }
        if let Some(oid) = self.tags.get(reference) {
            return Ok(*oid);
        }
        if reference == "HEAD" {
            if let Some(oid) = self
                .current_branch
                .as_ref()
                .and_then(|b| self.branch_heads.get(b))
                .or(self.detached_head.as_ref())
            {
                return Ok(*oid);
            }
        }

        Oid::from_str(reference)
            .ok()
            .filter(|oid| self.commits.contains_key(oid))
            .ok_or_else(|| GitAiError::unresolved(reference))
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current_branch.clone())
    }

    fn commits_between(&self, hide: Option<Oid>, tip: Oid) -> Result<Vec<CommitInfo>> {
        if !self.commits.contains_key(&tip) {
            return Err(GitAiError::unresolved(tip.to_string()));
        }

        let hidden = hide.map(|h| self.ancestors(h)).unwrap_or_default();
        let mut commits: Vec<CommitInfo> = self
            .ancestors(tip)
            .into_iter()
            .filter(|oid| !hidden.contains(oid))
            .filter_map(|oid| self.commits.get(&oid).cloned())
            .collect();

        commits.sort_by(|a, b| b.time.cmp(&a.time).then_with(|| b.hash.cmp(&a.hash)));
        Ok(commits)
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid> {
        let left = self.ancestors(one);
        self.ancestors(two)
            .into_iter()
            .filter(|oid| left.contains(oid))
            .filter_map(|oid| self.commits.get(&oid))
            .max_by_key(|info| info.time)
            .map(|info| info.oid)
            .ok_or_else(|| GitAiError::unresolved(format!("merge-base of {} and {}", one, two)))
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.branch_heads.keys().cloned().collect())
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        Ok(self
            .tags
            .iter()
            .map(|(name, oid)| (name.clone(), *oid))
            .collect())
    }
}
