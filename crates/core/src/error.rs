use crate::domain::remote::RemoteRemediation;
use thiserror::Error;

/// Fatal preflight errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("changes not committed detected in this repository.")]
    DirtyRepository,

    #[error("{remediation}{}", fork_hint_text(.fork_hint))]
    UnknownRemote {
        remediation: RemoteRemediation,
        /// Set when the remote was given with `--fork`.
        fork_hint: bool,
    },

    #[error("{}", unresolvable_text(.role, .name, .reference))]
    UnresolvableBranch {
        role: BranchRole,
        name: String,
        reference: String,
    },

    #[error("{addon} does not exist on {branch}")]
    MissingAddonOnSource { addon: String, branch: String },

    #[error("Unable to fetch {branch} from {remote}: {source}")]
    FetchFailure {
        remote: String,
        branch: String,
        source: anyhow::Error,
    },

    #[error("Port error: {source}")]
    Port { source: anyhow::Error },
}

/// Which side of the port a branch is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    Source,
    Target,
}

fn fork_hint_text(fork_hint: &bool) -> &'static str {
    if *fork_hint {
        "\n\nYou can change the GitHub organization with the --user-org option."
    } else {
        ""
    }
}

fn unresolvable_text(role: &BranchRole, name: &str, reference: &str) -> String {
    match role {
        BranchRole::Source => format!("No source branch {} available.", reference),
        BranchRole::Target => format!(
            "No target branch {} or {} available locally.",
            name, reference
        ),
    }
}

impl CoreError {
    pub fn port(source: anyhow::Error) -> Self {
        Self::Port { source }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
