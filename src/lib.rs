//! oca-port application library
//!
//! Wires the command line, the configuration file, the git2 adapter and the
//! workflows around the preflight and dispatch logic of `oca-port-core`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod styling;
pub mod workflows;

use anyhow::Result;
use oca_port_core::app::{dispatch, Preflight, PreflightRequest};
use oca_port_core::domain::InputStorage;
use oca_port_core::ports::{GitPort, WorkflowFactory, WorkflowParams};
use std::path::Path;

use crate::adapters::Git2Adapter;
use crate::cli::CliArgs;
use crate::config::{Config, Settings};
use crate::workflows::Git2Workflows;

/// Merge the command line with the config file it names, or the default one.
pub fn load_settings(cli_args: CliArgs, cwd: &Path) -> Result<Settings> {
    let config = Config::load(cli_args.config.clone())?;
    Settings::from_cli_and_config(cli_args, config, cwd)
}

/// Run one invocation against the repository containing `cwd`.
pub fn run(settings: &Settings, cwd: &Path, color: bool) -> Result<()> {
    let git = Git2Adapter::open(cwd)?;
    let factory = Git2Workflows::new(git.repository(), color);
    run_with(settings, &git, &factory, color)
}

/// Preflight, then dispatch to the workflow built by `factory`.
pub fn run_with(
    settings: &Settings,
    git: &dyn GitPort,
    factory: &dyn WorkflowFactory,
    color: bool,
) -> Result<()> {
    let request = PreflightRequest {
        from_branch: settings.from_branch.clone(),
        to_branch: settings.to_branch.clone(),
        addon: settings.addon.clone(),
        upstream: settings.upstream.clone(),
        repo_name: settings.repo_name.clone(),
        fork: settings.fork.clone(),
    };

    let verbose = settings.verbose;
    let plan = Preflight::new(git)
        .on_fetch(move |branch, url| {
            if verbose {
                println!("{}", styling::fetch_line(&branch.ref_name(), url, color));
            }
        })
        .run(&request)?;

    let params = WorkflowParams {
        upstream_org: settings.upstream_org.clone(),
        repo_name: settings.repo_name.clone(),
        storage: InputStorage::new(plan.to_branch.clone(), settings.addon.clone()),
        from_branch: plan.from_branch,
        to_branch: plan.to_branch,
        fork: settings.fork.clone(),
        user_org: settings.user_org.clone(),
        addon: settings.addon.clone(),
        verbose: settings.verbose,
        non_interactive: settings.non_interactive,
    };
    dispatch(factory, plan.decision, params)
}
