use crate::domain::DispatchDecision;
use crate::ports::{WorkflowFactory, WorkflowParams};
use anyhow::Result;
use tracing::info;

/// Build the workflow selected by `decision` and run it once.
///
/// Workflow errors are returned untouched.
pub fn dispatch(
    factory: &dyn WorkflowFactory,
    decision: DispatchDecision,
    params: WorkflowParams,
) -> Result<()> {
    info!(%decision, addon = %params.addon, "Dispatching");
    let mut workflow = factory.build(decision, params)?;
    workflow.run()
}
