use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;

pub const DEFAULT_UPSTREAM_ORG: &str = "OCA";
pub const DEFAULT_UPSTREAM: &str = "origin";

/// Defaults read from `oca-port.toml`, all optional
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub upstream_org: Option<String>,
    pub upstream: Option<String>,
    pub user_org: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub non_interactive: bool,
}

/// Options of one run once CLI arguments, config file and defaults are merged
#[derive(Debug, PartialEq, Clone)]
pub struct Settings {
    pub from_branch: String,
    pub to_branch: String,
    pub addon: String,
    pub upstream_org: String,
    pub upstream: String,
    pub repo_name: String,
    pub fork: Option<String>,
    pub user_org: Option<String>,
    pub verbose: bool,
    pub non_interactive: bool,
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "oca-port")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("oca-port.toml"))
}

impl Config {
    /// Load the config file. An explicit path must exist; a missing default
    /// file yields the defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    bail!("Config file not found: {}", p.display());
                }
                p
            }
            None => {
                let p = get_default_config_path()?;
                if !p.exists() {
                    return Ok(Config::default());
                }
                p
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

}

impl Settings {
    /// CLI args override the config file, which overrides the built-in defaults.
    pub fn from_cli_and_config(cli_args: CliArgs, config: Config, cwd: &Path) -> Result<Self> {
        let repo_name = match cli_args.repo_name {
            Some(name) => name,
            None => cwd
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .with_context(|| {
                    format!("Unable to guess the repository name from {}", cwd.display())
                })?,
        };
        // The fork remote is assumed to be named after the user organization
        let user_org = cli_args
            .user_org
            .or(config.user_org)
            .or_else(|| cli_args.fork.clone());

        Ok(Self {
            from_branch: cli_args.from_branch,
            to_branch: cli_args.to_branch,
            addon: cli_args.addon,
            upstream_org: cli_args
                .upstream_org
                .or(config.upstream_org)
                .unwrap_or_else(|| DEFAULT_UPSTREAM_ORG.to_string()),
            upstream: cli_args
                .upstream
                .or(config.upstream)
                .unwrap_or_else(|| DEFAULT_UPSTREAM.to_string()),
            repo_name,
            fork: cli_args.fork,
            user_org,
            verbose: cli_args.verbose || config.verbose,
            non_interactive: cli_args.non_interactive || config.non_interactive,
        })
    }
}

/// Default tracing filter, used when `RUST_LOG` is not set
pub fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
