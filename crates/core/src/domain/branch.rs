use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A branch given on the command line, resolved against the repository's
/// remotes and local heads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BranchRef {
    /// A branch only known as a local head.
    Local { name: String },
    /// A branch bound to a remote, fetched into `refs/remotes/<remote>/<name>`.
    Remote { remote: String, name: String },
}

/// Raised when the branch points at a default remote that is not configured.
///
/// The caller turns this into a remediation message; it carries the offending
/// remote name for that purpose.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No remote {remote} in the current repository")]
    UnknownRemote { remote: String },
}

impl BranchRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self::Local { name: name.into() }
    }

    pub fn remote(remote: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Remote {
            remote: remote.into(),
            name: name.into(),
        }
    }

    /// Resolve a user supplied branch name.
    ///
    /// - `<remote>/<branch>` where `<remote>` is configured binds to that remote.
    /// - a name matching a local head stays local.
    /// - anything else is looked up on `default_remote`, which must be configured.
    /// - without a default remote the name is taken as a local branch.
    pub fn resolve(
        input: &str,
        default_remote: Option<&str>,
        remotes: &[String],
        local_heads: &[String],
    ) -> Result<Self, ResolveError> {
        if let Some((remote, name)) = input.split_once('/') {
            if !name.is_empty() && remotes.iter().any(|r| r == remote) {
                return Ok(Self::remote(remote, name));
            }
        }

        if local_heads.iter().any(|head| head == input) {
            return Ok(Self::local(input));
        }

        match default_remote {
            Some(remote) if remotes.iter().any(|r| r == remote) => Ok(Self::remote(remote, input)),
            Some(remote) => Err(ResolveError::UnknownRemote {
                remote: remote.to_string(),
            }),
            None => Ok(Self::local(input)),
        }
    }

    /// Branch name without any remote prefix.
    pub fn name(&self) -> &str {
        match self {
            Self::Local { name } | Self::Remote { name, .. } => name,
        }
    }

    /// Remote the branch is bound to, if any.
    pub fn bound_remote(&self) -> Option<&str> {
        match self {
            Self::Local { .. } => None,
            Self::Remote { remote, .. } => Some(remote),
        }
    }

    /// Canonical short identifier: `remote/name` or `name`.
    pub fn ref_name(&self) -> String {
        match self {
            Self::Local { name } => name.clone(),
            Self::Remote { remote, name } => format!("{}/{}", remote, name),
        }
    }

    /// Fully qualified reference this branch is read from.
    pub fn full_ref(&self) -> String {
        match self {
            Self::Local { name } => format!("refs/heads/{}", name),
            Self::Remote { remote, name } => format!("refs/remotes/{}/{}", remote, name),
        }
    }
}

impl std::fmt::Display for BranchRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ref_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_remote_prefix_binds_to_that_remote() {
        let remotes = names(&["origin", "camptocamp"]);
        for default in [Some("origin"), Some("camptocamp"), Some("missing"), None] {
            let branch = BranchRef::resolve("origin/14.0", default, &remotes, &[]).unwrap();
            assert_eq!(branch, BranchRef::remote("origin", "14.0"));
            assert_eq!(branch.ref_name(), "origin/14.0");
        }
    }

    #[test]
    fn test_bare_name_uses_default_remote() {
        let remotes = names(&["origin"]);
        let branch = BranchRef::resolve("14.0", Some("origin"), &remotes, &[]).unwrap();
        assert_eq!(branch.bound_remote(), Some("origin"));
        assert_eq!(branch.name(), "14.0");
        assert_eq!(branch.full_ref(), "refs/remotes/origin/14.0");
    }

    #[test]
    fn test_bare_name_with_unknown_default_remote_fails() {
        let remotes = names(&["origin"]);
        let err = BranchRef::resolve("14.0", Some("upstream"), &remotes, &[]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownRemote {
                remote: "upstream".to_string()
            }
        );
    }

    #[test]
    fn test_local_head_wins_over_default_remote() {
        let remotes = names(&["origin"]);
        let heads = names(&["14.0-mig-shopfloor"]);
        let branch =
            BranchRef::resolve("14.0-mig-shopfloor", Some("origin"), &remotes, &heads).unwrap();
        assert_eq!(branch, BranchRef::local("14.0-mig-shopfloor"));
        assert_eq!(branch.bound_remote(), None);
        assert_eq!(branch.ref_name(), "14.0-mig-shopfloor");
        assert_eq!(branch.full_ref(), "refs/heads/14.0-mig-shopfloor");
    }

    #[test]
    fn test_local_head_is_kept_even_if_default_remote_is_missing() {
        let heads = names(&["dev"]);
        let branch = BranchRef::resolve("dev", Some("origin"), &[], &heads).unwrap();
        assert_eq!(branch, BranchRef::local("dev"));
    }

    #[test]
    fn test_slash_without_known_remote_falls_back_to_default_remote() {
        let remotes = names(&["origin"]);
        let branch = BranchRef::resolve("feature/x", Some("origin"), &remotes, &[]).unwrap();
        assert_eq!(branch, BranchRef::remote("origin", "feature/x"));
        assert_eq!(branch.ref_name(), "origin/feature/x");
    }

    #[test]
    fn test_no_default_remote_means_local() {
        let branch = BranchRef::resolve("14.0", None, &[], &[]).unwrap();
        assert_eq!(branch, BranchRef::local("14.0"));
        assert_eq!(branch.to_string(), "14.0");
    }
}
