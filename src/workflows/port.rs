use anyhow::Result;
use git2::Repository as GitRepository;
use oca_port_core::ports::{Workflow, WorkflowParams};
use std::collections::HashSet;
use tracing::{debug, info};

use super::{addon_commits, resolve_oid, CommitInfo};
use crate::adapters::FileInputStore;
use crate::styling::{bold, dim, success};

/// Lists the commits of an addon still missing on the target branch.
pub struct PortAddonPullRequest<'a> {
    repo: &'a GitRepository,
    params: WorkflowParams,
    store: FileInputStore,
    color: bool,
}

impl<'a> PortAddonPullRequest<'a> {
    pub fn new(
        repo: &'a GitRepository,
        params: WorkflowParams,
        store: FileInputStore,
        color: bool,
    ) -> Self {
        Self {
            repo,
            params,
            store,
            color,
        }
    }

    /// Source commits touching the addon that were neither ported nor declined, oldest first
    pub fn missing_commits(&self) -> Result<Vec<CommitInfo>> {
        let addon = &self.params.addon;
        let from_oid = resolve_oid(self.repo, &self.params.from_branch.full_ref())?;
        let to_oid = resolve_oid(self.repo, &self.params.to_branch.full_ref())?;

        // Ported commits live on the target after the fork point
        let fork_point = self.repo.merge_base(from_oid, to_oid).ok();
        let target_commits = addon_commits(self.repo, to_oid, fork_point, addon)?;
        let ported: HashSet<_> = target_commits.iter().map(CommitInfo::port_key).collect();

        let state = self.store.load()?;
        let candidates = addon_commits(self.repo, from_oid, Some(to_oid), addon)?;
        let missing = candidates
            .iter()
            .filter(|commit| {
                let keep = !ported.contains(&commit.port_key()) && !state.is_declined(&commit.id);
                if !keep {
                    debug!(id = %commit.id, "Already ported or declined");
                }
                keep
            })
            .cloned()
            .collect();
        Ok(missing)
    }
}

impl Workflow for PortAddonPullRequest<'_> {
    fn run(&mut self) -> Result<()> {
        let params = &self.params;
        let missing = self.missing_commits()?;
        info!(addon = %params.addon, missing = missing.len(), "Commits to port");

        if missing.is_empty() {
            println!(
                "{} Nothing to port from {} to {}.",
                success("✓", self.color),
                bold(&params.from_branch.ref_name(), self.color),
                bold(&params.to_branch.ref_name(), self.color)
            );
            return Ok(());
        }

        println!(
            "ℹ️  {} commit(s) of {} to port from {} to {}.",
            missing.len(),
            bold(&params.addon, self.color),
            bold(&params.from_branch.ref_name(), self.color),
            bold(&params.to_branch.ref_name(), self.color)
        );
        if params.verbose {
            for commit in &missing {
                println!("\t{} {}", dim(commit.short_id(), self.color), commit.summary);
            }
        }
        if params.fork.is_none() {
            println!("Use the {} option to port them.", dim("--fork", self.color));
        }
        Ok(())
    }
}
