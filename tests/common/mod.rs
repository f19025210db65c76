#![allow(dead_code)]

use anyhow::Result;
use git2::build::CheckoutBuilder;
use git2::{Oid, Repository, Signature, Time};
use oca_port::config::Settings;
use oca_port_core::ports::{Workflow, WorkflowFactory, WorkflowParams};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A bare upstream repository and an empty working repository with the
/// upstream configured as `origin`.
pub struct Fixture {
    pub dir: TempDir,
    pub upstream: Repository,
    pub local: Repository,
    pub local_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let upstream_path = dir.path().join("upstream.git");
        let upstream = Repository::init_bare(&upstream_path)?;

        let local_path = dir.path().join("wms");
        fs::create_dir_all(&local_path)?;
        let local = Repository::init(&local_path)?;
        local.remote("origin", &upstream_path.to_string_lossy())?;

        Ok(Self {
            dir,
            upstream,
            local,
            local_path,
        })
    }

    pub fn add_remote(&self, name: &str) -> Result<()> {
        let path = self.dir.path().join(format!("{}.git", name));
        Repository::init_bare(&path)?;
        self.local.remote(name, &path.to_string_lossy())?;
        Ok(())
    }

    pub fn tracking_ref_exists(&self, remote: &str, branch: &str) -> bool {
        self.local
            .find_reference(&format!("refs/remotes/{}/{}", remote, branch))
            .is_ok()
    }

    /// Stage a new file so the working repository has uncommitted changes
    pub fn make_dirty(&self) -> Result<()> {
        fs::write(self.local_path.join("staged.txt"), "staged content")?;
        let mut index = self.local.index()?;
        index.add_path(Path::new("staged.txt"))?;
        index.write()?;
        Ok(())
    }

    /// Leave the working repository in the middle of a merge with an
    /// unresolved conflict on `shopfloor/__manifest__.py`
    pub fn make_conflicted(&self) -> Result<()> {
        let repo = &self.local;
        let base = commit_on(repo, "main", &[("shopfloor", "base")], "base", 1_600_000_000)?;
        branch_at(repo, "feature", base)?;
        let theirs = commit_on(
            repo,
            "feature",
            &[("shopfloor", "theirs")],
            "theirs",
            1_600_000_100,
        )?;
        commit_on(repo, "main", &[("shopfloor", "ours")], "ours", 1_600_000_200)?;

        repo.set_head("refs/heads/main")?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))?;

        let theirs = repo.find_annotated_commit(theirs)?;
        repo.merge(
            &[&theirs],
            None,
            Some(CheckoutBuilder::new().allow_conflicts(true)),
        )?;
        Ok(())
    }
}

/// Build a root tree holding a README file and one directory per addon
/// with a `__manifest__.py` of the given content.
pub fn build_tree(repo: &Repository, addons: &[(&str, &str)]) -> Result<Oid> {
    let mut root = repo.treebuilder(None)?;
    let readme = repo.blob(b"# Addons\n")?;
    root.insert("README.md", readme, 0o100644)?;

    for (addon, manifest) in addons {
        let blob = repo.blob(manifest.as_bytes())?;
        let mut addon_tree = repo.treebuilder(None)?;
        addon_tree.insert("__manifest__.py", blob, 0o100644)?;
        let addon_oid = addon_tree.write()?;
        root.insert(*addon, addon_oid, 0o040000)?;
    }
    Ok(root.write()?)
}

/// Commit `addons` as the whole content of `branch`, on top of its current tip.
pub fn commit_on(
    repo: &Repository,
    branch: &str,
    addons: &[(&str, &str)],
    message: &str,
    time: i64,
) -> Result<Oid> {
    let tree = repo.find_tree(build_tree(repo, addons)?)?;
    let refname = format!("refs/heads/{}", branch);
    let parent = repo
        .find_reference(&refname)
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let signature = Signature::new("Test User", "test@example.com", &Time::new(time, 0))?;
    Ok(repo.commit(
        Some(&refname),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?)
}

/// Point `branch` at `target`
pub fn branch_at(repo: &Repository, branch: &str, target: Oid) -> Result<()> {
    repo.reference(
        &format!("refs/heads/{}", branch),
        target,
        true,
        "test branch",
    )?;
    Ok(())
}

pub fn settings(from: &str, to: &str, addon: &str) -> Settings {
    Settings {
        from_branch: from.to_string(),
        to_branch: to.to_string(),
        addon: addon.to_string(),
        upstream_org: "OCA".to_string(),
        upstream: "origin".to_string(),
        repo_name: "wms".to_string(),
        fork: None,
        user_org: None,
        verbose: false,
        non_interactive: true,
    }
}

/// Records the workflows built by the dispatch, without running anything
#[derive(Default)]
pub struct RecordingFactory {
    pub built: RefCell<Vec<(String, WorkflowParams)>>,
}

struct NoopWorkflow;

impl Workflow for NoopWorkflow {
    fn run(&mut self) -> Result<()> {
        Ok(())
    }
}

impl WorkflowFactory for RecordingFactory {
    fn migrate(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        self.built.borrow_mut().push(("migrate".to_string(), params));
        Ok(Box::new(NoopWorkflow))
    }

    fn port_pull_requests(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        self.built.borrow_mut().push(("port".to_string(), params));
        Ok(Box::new(NoopWorkflow))
    }
}

impl RecordingFactory {
    pub fn kinds(&self) -> Vec<String> {
        self.built.borrow().iter().map(|(kind, _)| kind.clone()).collect()
    }
}
