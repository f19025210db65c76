use crate::domain::{BranchRef, DispatchDecision, RemoteCheck, RemoteRemediation, ResolveError};
use crate::error::{BranchRole, CoreError, Result};
use crate::ports::GitPort;
use tracing::{debug, info};

/// Raw inputs of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightRequest {
    pub from_branch: String,
    pub to_branch: String,
    pub addon: String,
    /// Remote used for branch names without an explicit remote
    pub upstream: String,
    pub repo_name: String,
    pub fork: Option<String>,
}

/// Result of a successful preflight: both branches and the workflow to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub from_branch: BranchRef,
    pub to_branch: BranchRef,
    pub decision: DispatchDecision,
}

/// Runs every check that must pass before a workflow may touch the repository.
pub struct Preflight<'a> {
    git: &'a dyn GitPort,
    on_fetch: Option<Box<dyn Fn(&BranchRef, Option<&str>) + 'a>>,
}

impl<'a> Preflight<'a> {
    pub fn new(git: &'a dyn GitPort) -> Self {
        Self {
            git,
            on_fetch: None,
        }
    }

    /// Called before each fetch with the branch and the remote URL
    pub fn on_fetch(mut self, listener: impl Fn(&BranchRef, Option<&str>) + 'a) -> Self {
        self.on_fetch = Some(Box::new(listener));
        self
    }

    pub fn run(&self, request: &PreflightRequest) -> Result<Plan> {
        check_clean(self.git)?;

        if let Some(fork) = &request.fork {
            if let RemoteCheck::Missing(remediation) =
                check_remote(self.git, &request.repo_name, fork)?
            {
                return Err(CoreError::UnknownRemote {
                    remediation,
                    fork_hint: true,
                });
            }
        }

        let from_branch = resolve_branch(
            self.git,
            &request.from_branch,
            &request.upstream,
            &request.repo_name,
        )?;
        let to_branch = resolve_branch(
            self.git,
            &request.to_branch,
            &request.upstream,
            &request.repo_name,
        )?;
        debug!(from = %from_branch, to = %to_branch, "Resolved branches");

        fetch_branches(self.git, &[&from_branch, &to_branch], |branch, url| {
            if let Some(listener) = &self.on_fetch {
                listener(branch, url);
            }
        })?;
        check_branches(self.git, &from_branch, &to_branch)?;

        if !addon_exists(self.git, &from_branch, &request.addon)? {
            return Err(CoreError::MissingAddonOnSource {
                addon: request.addon.clone(),
                branch: from_branch.ref_name(),
            });
        }
        let on_target = addon_exists(self.git, &to_branch, &request.addon)?;
        let decision = DispatchDecision::from_target_presence(on_target);
        info!(addon = %request.addon, %decision, "Preflight passed");

        Ok(Plan {
            from_branch,
            to_branch,
            decision,
        })
    }
}

/// Refuse to work on a repository with uncommitted changes.
pub fn check_clean(git: &dyn GitPort) -> Result<()> {
    if git.is_dirty().map_err(CoreError::port)? {
        return Err(CoreError::DirtyRepository);
    }
    Ok(())
}

/// Check that `remote` is configured, returning instructions to add it otherwise.
pub fn check_remote(git: &dyn GitPort, repo_name: &str, remote: &str) -> Result<RemoteCheck> {
    let remotes = git.remote_names().map_err(CoreError::port)?;
    if remotes.iter().any(|r| r == remote) {
        Ok(RemoteCheck::Ok)
    } else {
        Ok(RemoteCheck::Missing(RemoteRemediation::new(remote, repo_name)))
    }
}

/// Resolve a branch name, turning a missing default remote into remediation text.
pub fn resolve_branch(
    git: &dyn GitPort,
    input: &str,
    default_remote: &str,
    repo_name: &str,
) -> Result<BranchRef> {
    let remotes = git.remote_names().map_err(CoreError::port)?;
    let local_heads = git.local_branches().map_err(CoreError::port)?;
    match BranchRef::resolve(input, Some(default_remote), &remotes, &local_heads) {
        Ok(branch) => Ok(branch),
        Err(ResolveError::UnknownRemote { remote }) => Err(CoreError::UnknownRemote {
            remediation: RemoteRemediation::new(remote, repo_name),
            fork_hint: false,
        }),
    }
}

/// Fetch each remote-bound branch, in order. Local branches are skipped.
pub fn fetch_branches(
    git: &dyn GitPort,
    branches: &[&BranchRef],
    mut on_fetch: impl FnMut(&BranchRef, Option<&str>),
) -> Result<()> {
    for branch in branches {
        let BranchRef::Remote { remote, name } = branch else {
            debug!(branch = %branch, "Local branch, nothing to fetch");
            continue;
        };
        let url = git.remote_url(remote).map_err(CoreError::port)?;
        on_fetch(branch, url.as_deref());
        info!(%remote, branch = %name, "Fetching");
        git.fetch_branch(remote, name)
            .map_err(|source| CoreError::FetchFailure {
                remote: remote.clone(),
                branch: name.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Check that both branches are available after the fetch.
///
/// The source must come from a remote. The target may also be a local head,
/// to keep working on a local migration branch.
pub fn check_branches(git: &dyn GitPort, from_branch: &BranchRef, to_branch: &BranchRef) -> Result<()> {
    let source_ok = from_branch.bound_remote().is_some()
        && git
            .has_reference(&from_branch.full_ref())
            .map_err(CoreError::port)?;
    if !source_ok {
        return Err(CoreError::UnresolvableBranch {
            role: BranchRole::Source,
            name: from_branch.name().to_string(),
            reference: from_branch.ref_name(),
        });
    }

    let remote_ok = to_branch.bound_remote().is_some()
        && git
            .has_reference(&to_branch.full_ref())
            .map_err(CoreError::port)?;
    let local_ok = git
        .has_reference(&format!("refs/heads/{}", to_branch.name()))
        .map_err(CoreError::port)?;
    if !remote_ok && !local_ok {
        return Err(CoreError::UnresolvableBranch {
            role: BranchRole::Target,
            name: to_branch.name().to_string(),
            reference: to_branch.ref_name(),
        });
    }
    Ok(())
}

/// Whether `addon` is a directory at the root of `branch`.
pub fn addon_exists(git: &dyn GitPort, branch: &BranchRef, addon: &str) -> Result<bool> {
    let directories = git
        .root_directories(&branch.full_ref())
        .map_err(CoreError::port)?;
    let exists = directories.iter().any(|dir| dir == addon);
    debug!(%addon, branch = %branch, exists, "Addon presence");
    Ok(exists)
}
