use anyhow::Result;

/// Port for the git operations the preflight needs on the working repository
pub trait GitPort {
    /// Whether tracked files have uncommitted changes (staged or not)
    fn is_dirty(&self) -> Result<bool>;

    /// Names of the configured remotes
    fn remote_names(&self) -> Result<Vec<String>>;

    /// URL of a configured remote
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;

    /// Short names of the local branches (`refs/heads/*`)
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Fetch a single branch from `remote` into `refs/remotes/<remote>/<branch>`
    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Whether a fully qualified reference exists
    fn has_reference(&self, full_ref: &str) -> Result<bool>;

    /// Names of the directories at the root of the tree of the commit `full_ref` points to
    fn root_directories(&self, full_ref: &str) -> Result<Vec<String>>;
}
