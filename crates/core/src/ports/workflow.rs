use crate::domain::{BranchRef, DispatchDecision, InputStorage};
use anyhow::Result;

/// Everything a downstream workflow is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowParams {
    pub upstream_org: String,
    pub repo_name: String,
    pub from_branch: BranchRef,
    pub to_branch: BranchRef,
    /// Remote receiving the ported work, if any
    pub fork: Option<String>,
    pub user_org: Option<String>,
    pub addon: String,
    pub storage: InputStorage,
    pub verbose: bool,
    pub non_interactive: bool,
}

/// A downstream workflow, run at most once
pub trait Workflow {
    fn run(&mut self) -> Result<()>;
}

/// Builds the workflow matching a dispatch decision
pub trait WorkflowFactory {
    fn migrate(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>>;

    fn port_pull_requests(&self, params: WorkflowParams) -> Result<Box<dyn Workflow + '_>>;

    fn build(
        &self,
        decision: DispatchDecision,
        params: WorkflowParams,
    ) -> Result<Box<dyn Workflow + '_>> {
        match decision {
            DispatchDecision::Migrate => self.migrate(params),
            DispatchDecision::PortPullRequests => self.port_pull_requests(params),
        }
    }
}
