/// Outcome of checking that a remote is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCheck {
    Ok,
    Missing(RemoteRemediation),
}

/// Copy-paste instructions to add a missing GitHub remote.
///
/// The remote name doubles as the GitHub organization in the suggested URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRemediation {
    pub remote: String,
    pub repo_name: String,
}

impl RemoteRemediation {
    pub fn new(remote: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            repo_name: repo_name.into(),
        }
    }

    pub fn ssh_command(&self) -> String {
        format!(
            "git remote add {} git@github.com:{}/{}.git",
            self.remote, self.remote, self.repo_name
        )
    }

    pub fn https_command(&self) -> String {
        format!(
            "git remote add {} https://github.com/{}/{}.git",
            self.remote, self.remote, self.repo_name
        )
    }
}

impl std::fmt::Display for RemoteRemediation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "No remote {} in the current repository.", self.remote)?;
        writeln!(f, "To add it:")?;
        writeln!(f, "\t# This mode requires an SSH key in the GitHub account")?;
        writeln!(f, "\t$ {}", self.ssh_command())?;
        writeln!(f, "   Or:")?;
        writeln!(f, "\t# This will require to enter user/password each time")?;
        write!(f, "\t$ {}", self.https_command())
    }
}
