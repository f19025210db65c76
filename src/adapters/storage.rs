use anyhow::{Context, Result};
use directories::ProjectDirs;
use oca_port_core::domain::{BranchRef, InputStorage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User answers kept between runs for one addon on one target branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortState {
    pub target: Option<BranchRef>,
    #[serde(default)]
    pub declined: Vec<DeclinedCommit>,
}

/// A commit the user chose not to port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclinedCommit {
    pub id: String,
    pub reason: Option<String>,
}

impl PortState {
    pub fn is_declined(&self, id: &str) -> bool {
        self.declined.iter().any(|c| c.id == id)
    }

    pub fn decline(&mut self, id: impl Into<String>, reason: Option<String>) {
        let id = id.into();
        if !self.is_declined(&id) {
            self.declined.push(DeclinedCommit { id, reason });
        }
    }
}

/// TOML file backing an `InputStorage` handle
pub struct FileInputStore {
    path: PathBuf,
    target: BranchRef,
}

impl FileInputStore {
    /// Store under the user data directory
    pub fn new(storage: &InputStorage, repo_name: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "oca-port")
            .context("Failed to determine project directories")?;
        Ok(Self::with_root(proj_dirs.data_dir(), storage, repo_name))
    }

    pub fn with_root<P: AsRef<Path>>(root: P, storage: &InputStorage, repo_name: &str) -> Self {
        let path = root
            .as_ref()
            .join(repo_name)
            .join(storage.target.name())
            .join(format!("{}.toml", storage.addon));
        Self {
            path,
            target: storage.target.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PortState> {
        if !self.path.exists() {
            return Ok(PortState {
                target: Some(self.target.clone()),
                ..PortState::default()
            });
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    pub fn save(&self, state: &PortState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(state).context("Failed to serialize port state")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
