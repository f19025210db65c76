/// Which downstream workflow handles the addon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchDecision {
    /// The addon does not exist on the target branch yet.
    Migrate,
    /// The addon exists on both branches; port the missing commits.
    PortPullRequests,
}

impl DispatchDecision {
    pub fn from_target_presence(addon_on_target: bool) -> Self {
        if addon_on_target {
            Self::PortPullRequests
        } else {
            Self::Migrate
        }
    }
}

impl std::fmt::Display for DispatchDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Migrate => write!(f, "migrate"),
            Self::PortPullRequests => write!(f, "port pull requests"),
        }
    }
}
