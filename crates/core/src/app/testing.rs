//! In-memory doubles for the ports, shared by the core tests.

use crate::ports::{GitPort, Workflow, WorkflowFactory, WorkflowParams};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Fake repository: remote branches become visible as remote-tracking refs once fetched.
#[derive(Default)]
pub struct FakeGit {
    dirty: bool,
    remotes: BTreeSet<String>,
    /// (remote, branch) -> root directories, as seen on the remote side
    remote_branches: BTreeMap<(String, String), Vec<String>>,
    /// full ref -> root directories, as present in the local repository
    refs: RefCell<BTreeMap<String, Vec<String>>>,
    fetched: RefCell<Vec<(String, String)>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn with_remote(mut self, remote: &str) -> Self {
        self.remotes.insert(remote.to_string());
        self
    }

    pub fn with_branch(mut self, remote: &str, branch: &str, dirs: &[&str]) -> Self {
        self.remote_branches.insert(
            (remote.to_string(), branch.to_string()),
            dirs.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn with_local_branch(self, branch: &str, dirs: &[&str]) -> Self {
        self.refs.borrow_mut().insert(
            format!("refs/heads/{}", branch),
            dirs.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn fetched(&self) -> Vec<(String, String)> {
        self.fetched.borrow().clone()
    }
}

impl GitPort for FakeGit {
    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        Ok(self.remotes.iter().cloned().collect())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self
            .remotes
            .contains(remote)
            .then(|| format!("https://example.com/{}.git", remote)))
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self
            .refs
            .borrow()
            .keys()
            .filter_map(|r| r.strip_prefix("refs/heads/").map(String::from))
            .collect())
    }

    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let key = (remote.to_string(), branch.to_string());
        let dirs = self
            .remote_branches
            .get(&key)
            .ok_or_else(|| anyhow!("couldn't find remote ref refs/heads/{}", branch))?;
        self.refs
            .borrow_mut()
            .insert(format!("refs/remotes/{}/{}", remote, branch), dirs.clone());
        self.fetched.borrow_mut().push(key);
        Ok(())
    }

    fn has_reference(&self, full_ref: &str) -> Result<bool> {
        Ok(self.refs.borrow().contains_key(full_ref))
    }

    fn root_directories(&self, full_ref: &str) -> Result<Vec<String>> {
        self.refs
            .borrow()
            .get(full_ref)
            .cloned()
            .ok_or_else(|| anyhow!("revspec '{}' not found", full_ref))
    }
}

/// Records which workflows were built and run.
#[derive(Default)]
pub struct RecordingFactory {
    pub events: RefCell<Vec<String>>,
    pub fail_run: bool,
}

struct RecordingWorkflow<'a> {
    kind: &'static str,
    factory: &'a RecordingFactory,
}

impl Workflow for RecordingWorkflow<'_> {
    fn run(&mut self) -> Result<()> {
        self.factory
            .events
            .borrow_mut()
            .push(format!("run {}", self.kind));
        if self.factory.fail_run {
            return Err(anyhow!("{} failed", self.kind));
        }
        Ok(())
    }
}

impl RecordingFactory {
    fn record(&self, kind: &'static str, params: &WorkflowParams) -> Box<dyn Workflow + '_> {
        self.events
            .borrow_mut()
            .push(format!("build {} {}", kind, params.addon));
        Box::new(RecordingWorkflow {
            kind,
            factory: self,
        })
    }
}

impl WorkflowFactory for RecordingFactory {
    fn migrate(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        Ok(self.record("migrate", &params))
    }

    fn port_pull_requests(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>> {
        Ok(self.record("port", &params))
    }
}
