use crate::domain::branch::BranchRef;

/// Key of the persisted user input for one addon on one target branch.
///
/// The preflight only builds it and hands it to the selected workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStorage {
    pub target: BranchRef,
    pub addon: String,
}

impl InputStorage {
    pub fn new(target: BranchRef, addon: impl Into<String>) -> Self {
        Self {
            target,
            addon: addon.into(),
        }
    }
}
