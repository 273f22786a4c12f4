//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

/// Commit times start here and grow by a minute per commit
const EPOCH: i64 = 1_714_564_800;

/// A test git repository builder for integration tests.
///
/// HEAD starts on an unborn `main` regardless of the user's
/// `init.defaultBranch`.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    clock: Cell<i64>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        repo.set_head("refs/heads/main")
            .expect("Failed to point HEAD at main");
        Self {
            dir,
            repo,
            clock: Cell::new(EPOCH),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        let now = self.clock.get() + 60;
        self.clock.set(now);
        Signature::new("Test User", "test@example.com", &Time::new(now, 0))
            .expect("Failed to create signature")
    }

    /// Commit on the checked-out branch. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_to("HEAD", message)
    }

    /// Commit on top of `refname` (e.g. `refs/heads/feature/x`) and advance it.
    pub fn commit_to(&self, refname: &str, message: &str) -> Oid {
        let sig = self.signature();

        // a fresh blob per commit so every tree differs
        let blob = self
            .repo
            .blob(format!("{}\n{}", message, sig.when().seconds()).as_bytes())
            .expect("Failed to write blob");
        let mut builder = self.repo.treebuilder(None).expect("Failed to create tree builder");
        builder
            .insert("test.txt", blob, 0o100644)
            .expect("Failed to insert blob");
        let tree_id = builder.write().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self
            .repo
            .revparse_single(refname)
            .ok()
            .and_then(|obj| obj.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some(refname), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = self.signature();
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, message, false)
            .expect("Failed to create annotated tag");
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }

    /// Check out a branch by moving HEAD; the work tree is left alone.
    pub fn switch(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Failed to switch branch");
    }

    /// main: three plain commits. feature/x branches off and adds one AI and
    /// one plain commit. HEAD stays on main.
    pub fn with_feature_branch() -> Self {
        let repo = Self::new();
        repo.commit("initial commit");
        repo.commit("add readme");
        let fork = repo.commit("add ci");
        repo.branch("feature/x", fork);
        repo.commit_to("refs/heads/feature/x", "[AI] add parser");
        repo.commit_to("refs/heads/feature/x", "fix parser edge case");
        repo
    }

    /// v1.0 after five plain commits, v1.1 three commits later (two AI).
    pub fn with_release_tags() -> Self {
        let repo = Self::new();
        let mut tip = repo.commit("c1");
        for i in 2..=5 {
            tip = repo.commit(&format!("c{}", i));
        }
        repo.tag_annotated("v1.0", tip, "release 1.0");
        repo.commit("[AI] generate client");
        repo.commit("tweak client by hand");
        let tip = repo.commit("[AI] add client tests");
        repo.tag_lightweight("v1.1", tip);
        repo
    }
}
