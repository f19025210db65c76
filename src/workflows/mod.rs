//! Read-only workflows run once the preflight has picked one.

pub mod migrate;
pub mod port;

pub use migrate::*;
pub use port::*;

use anyhow::{Context, Result};
use git2::{Commit as GitCommit, Oid, Repository as GitRepository, Sort};
use oca_port_core::ports::{Workflow, WorkflowFactory, WorkflowParams};
use std::path::{Path, PathBuf};

use crate::adapters::FileInputStore;

/// A commit of the source branch, as listed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: String,
    pub summary: String,
    pub author_email: String,
    pub author_time: i64,
}

impl CommitInfo {
    fn from_commit(commit: &GitCommit<'_>) -> Self {
        let author = commit.author();
        Self {
            id: commit.id().to_string(),
            summary: commit.summary().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            author_time: author.when().seconds(),
        }
    }

    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }

    /// Identity kept by a cherry-pick: same summary, author and author date
    fn port_key(&self) -> (&str, &str, i64) {
        (&self.summary, &self.author_email, self.author_time)
    }
}

fn addon_tree_id(commit: &GitCommit<'_>, addon: &str) -> Result<Option<Oid>> {
    let tree = commit.tree()?;
    Ok(tree.get_path(Path::new(addon)).ok().map(|entry| entry.id()))
}

/// Whether `commit` changes the `addon` directory compared to its first parent.
fn touches_addon(commit: &GitCommit<'_>, addon: &str) -> Result<bool> {
    let current = addon_tree_id(commit, addon)?;
    let previous = match commit.parents().next() {
        Some(parent) => addon_tree_id(&parent, addon)?,
        None => None,
    };
    Ok(current != previous)
}

/// Non-merge commits reachable from `include` and not from `exclude` that
/// touch `addon`, oldest first.
fn addon_commits(
    repo: &GitRepository,
    include: Oid,
    exclude: Option<Oid>,
    addon: &str,
) -> Result<Vec<CommitInfo>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
    revwalk.push(include)?;
    if let Some(exclude) = exclude {
        revwalk.hide(exclude)?;
    }

    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        if commit.parent_count() > 1 {
            continue;
        }
        if touches_addon(&commit, addon)? {
            commits.push(CommitInfo::from_commit(&commit));
        }
    }
    Ok(commits)
}

fn resolve_oid(repo: &GitRepository, full_ref: &str) -> Result<Oid> {
    repo.refname_to_id(full_ref)
        .with_context(|| format!("Failed to resolve {}", full_ref))
}

/// Builds the git2 backed workflows
pub struct Git2Workflows<'a> {
    repo: &'a GitRepository,
    /// Root of the input storage files, the user data directory when unset
    store_root: Option<PathBuf>,
    color: bool,
}

impl<'a> Git2Workflows<'a> {
    pub fn new(repo: &'a GitRepository, color: bool) -> Self {
        Self {
            repo,
            store_root: None,
            color,
        }
    }

    pub fn with_store_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.store_root = Some(root.as_ref().to_path_buf());
        self
    }
}

impl WorkflowFactory for Git2Workflows<'_> {
    fn migrate(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        Ok(Box::new(MigrateAddon::new(self.repo, params, self.color)))
    }

    fn port_pull_requests(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        let store = match &self.store_root {
            Some(root) => FileInputStore::with_root(root, &params.storage, &params.repo_name),
            None => FileInputStore::new(&params.storage, &params.repo_name)?,
        };
        Ok(Box::new(PortAddonPullRequest::new(
            self.repo, params, store, self.color,
        )))
    }
}
