use anyhow::{bail, Context, Result};
use git2::{
    BranchType, Cred, CredentialType, Direction, FetchOptions, ObjectType, RemoteCallbacks,
    Repository as GitRepository, Status, StatusOptions,
};
use oca_port_core::ports::GitPort;
use std::path::Path;
use tracing::debug;

/// Git adapter that implements GitPort using git2
pub struct Git2Adapter {
    repo: GitRepository,
}

impl Git2Adapter {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = GitRepository::discover(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
        Ok(Self { repo })
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }
}

/// Credentials for fetching: SSH agent, then the git credential helper.
fn remote_callbacks<'a>(config: Option<git2::Config>) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;
    callbacks.credentials(move |url, username_from_url, allowed| {
        // libgit2 keeps asking while the credentials are rejected
        attempts += 1;
        if attempts > 3 {
            return Err(git2::Error::from_str("authentication failed"));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(config) = &config {
                return Cred::credential_helper(config, url, username_from_url);
            }
        }
        Cred::default()
    });
    callbacks
}

impl GitPort for Git2Adapter {
    fn is_dirty(&self) -> Result<bool> {
        // Untracked files are not uncommitted changes, unresolved conflicts are
        let mut status_options = StatusOptions::new();
        status_options.include_untracked(false);
        status_options.include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut status_options))
            .context("Failed to get git status")?;

        let dirty = statuses.iter().any(|entry| {
            entry.status().intersects(
                Status::INDEX_NEW
                    | Status::INDEX_MODIFIED
                    | Status::INDEX_DELETED
                    | Status::INDEX_RENAMED
                    | Status::INDEX_TYPECHANGE
                    | Status::WT_MODIFIED
                    | Status::WT_DELETED
                    | Status::WT_TYPECHANGE
                    | Status::WT_RENAMED
                    | Status::CONFLICTED,
            )
        });
        Ok(dirty)
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes().context("Failed to list remotes")?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let remote_obj = self
            .repo
            .find_remote(remote)
            .with_context(|| format!("Remote '{}' not found", remote))?;
        Ok(remote_obj.url().map(String::from))
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self
            .repo
            .branches(Some(BranchType::Local))
            .context("Failed to list local branches")?
        {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote_obj = self
            .repo
            .find_remote(remote)
            .with_context(|| format!("Remote '{}' not found", remote))?;

        let refspec = format!("+refs/heads/{branch}:refs/remotes/{remote}/{branch}");
        let wanted = format!("refs/heads/{}", branch);

        let mut connection = remote_obj
            .connect_auth(Direction::Fetch, Some(remote_callbacks(self.repo.config().ok())), None)
            .with_context(|| format!("Failed to connect to {}", remote))?;

        // libgit2 fetches nothing, without error, when the branch does not exist
        let advertised = connection
            .list()
            .context("Failed to read the remote references")?
            .iter()
            .any(|head| head.name() == wanted);
        if !advertised {
            bail!("couldn't find remote ref {}", wanted);
        }

        debug!(%refspec, "Fetching refspec");
        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(self.repo.config().ok()));
        connection
            .remote()
            .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
            .with_context(|| format!("Failed to fetch {} from {}", branch, remote))?;
        Ok(())
    }

    fn has_reference(&self, full_ref: &str) -> Result<bool> {
        match self.repo.find_reference(full_ref) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to look up {}", full_ref)),
        }
    }

    fn root_directories(&self, full_ref: &str) -> Result<Vec<String>> {
        let tree = self
            .repo
            .find_reference(full_ref)
            .and_then(|r| r.peel_to_tree())
            .with_context(|| format!("Failed to read the tree of {}", full_ref))?;

        Ok(tree
            .iter()
            .filter(|entry| entry.kind() == Some(ObjectType::Tree))
            .filter_map(|entry| entry.name().map(String::from))
            .collect())
    }
}
