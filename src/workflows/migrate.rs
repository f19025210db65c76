use anyhow::Result;
use git2::Repository as GitRepository;
use oca_port_core::ports::{Workflow, WorkflowParams};
use tracing::info;

use super::{addon_commits, resolve_oid, CommitInfo};
use crate::styling::{bold, dim};

/// Steps of the OCA migration of one addon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Local branch receiving the migration, `<target>-mig-<addon>`
    pub branch: String,
    pub branch_exists: bool,
    /// Source commits touching the addon that the target lacks
    pub commits: Vec<CommitInfo>,
    /// Commands to run, in order
    pub commands: Vec<String>,
    pub pr_title: String,
}

/// Assists the migration of an addon missing on the target branch.
///
/// Nothing is written to the repository: the plan is printed for the user.
pub struct MigrateAddon<'a> {
    repo: &'a GitRepository,
    params: WorkflowParams,
    color: bool,
}

impl<'a> MigrateAddon<'a> {
    pub fn new(repo: &'a GitRepository, params: WorkflowParams, color: bool) -> Self {
        Self {
            repo,
            params,
            color,
        }
    }

    pub fn plan(&self) -> Result<MigrationPlan> {
        let params = &self.params;
        let from = &params.from_branch;
        let to = &params.to_branch;
        let branch = format!("{}-mig-{}", to.name(), params.addon);
        let branch_exists = self
            .repo
            .find_reference(&format!("refs/heads/{}", branch))
            .is_ok();

        let from_oid = resolve_oid(self.repo, &from.full_ref())?;
        let to_oid = resolve_oid(self.repo, &to.full_ref())?;
        let commits = addon_commits(self.repo, from_oid, Some(to_oid), &params.addon)?;

        let mut commands = Vec::new();
        if !branch_exists {
            commands.push(format!(
                "git checkout --no-track -b {} {}",
                branch,
                to.ref_name()
            ));
        } else {
            commands.push(format!("git checkout {}", branch));
        }
        commands.push(format!(
            "git format-patch --keep-subject --stdout {}..{} -- {} | git am -3 --keep",
            to.ref_name(),
            from.ref_name(),
            params.addon
        ));
        commands.push("pre-commit run -a".to_string());
        commands.push(format!(
            "git commit -am \"[MIG] {}: Migration to {}\"",
            params.addon,
            to.name()
        ));
        if let Some(fork) = &params.fork {
            commands.push(format!("git push {} {} --set-upstream", fork, branch));
        }

        Ok(MigrationPlan {
            pr_title: format!("[{}][MIG] {}", to.name(), params.addon),
            branch,
            branch_exists,
            commits,
            commands,
        })
    }
}

impl Workflow for MigrateAddon<'_> {
    fn run(&mut self) -> Result<()> {
        let params = &self.params;
        let plan = self.plan()?;
        info!(branch = %plan.branch, commits = plan.commits.len(), "Migration plan ready");

        println!(
            "ℹ️  {} can be migrated from {} to {}.",
            bold(&params.addon, self.color),
            bold(params.from_branch.name(), self.color),
            bold(params.to_branch.name(), self.color)
        );
        if params.verbose {
            for commit in &plan.commits {
                println!("\t{} {}", dim(commit.short_id(), self.color), commit.summary);
            }
        }

        if params.fork.is_none() {
            println!(
                "Use the {} option to start the migration.",
                dim("--fork", self.color)
            );
            return Ok(());
        }

        if plan.branch_exists {
            println!(
                "Branch {} already exists, resume the migration there:",
                bold(&plan.branch, self.color)
            );
        } else {
            println!(
                "Migrate on a new {} branch:",
                bold(&plan.branch, self.color)
            );
        }
        for command in &plan.commands {
            println!("\t{}", dim(&format!("$ {}", command), self.color));
        }
        let org = params.user_org.as_deref().unwrap_or(&params.upstream_org);
        println!(
            "Then open a pull request from {}:{} against {}/{} titled \"{}\".",
            org,
            plan.branch,
            params.upstream_org,
            params.repo_name,
            plan.pr_title
        );
        Ok(())
    }
}
