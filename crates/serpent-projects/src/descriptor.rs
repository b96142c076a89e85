//! Project descriptor (`serpent.conf`) persistence

use crate::error::{Error, Result};
use crate::types::{DevFeature, DESCRIPTOR_FILE};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

/// Per-project record of template type and disk dependency references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Template that created the project and drives `serpent run`
    #[serde(rename = "type")]
    pub template: String,

    /// Names of projects referenced by local path
    pub diskdeps: Vec<String>,

    /// Development feature selected at creation
    #[serde(default)]
    pub devfeature: Option<DevFeature>,
}

impl Descriptor {
    pub fn new(template: impl Into<String>, devfeature: Option<DevFeature>) -> Self {
        Self {
            template: template.into(),
            diskdeps: Vec::new(),
            devfeature,
        }
    }

    /// Path of the descriptor file inside `dir`
    pub fn path_in(dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(DESCRIPTOR_FILE)
    }

    /// Whether `dir` holds a descriptor file
    pub fn exists_in(dir: &Utf8Path) -> bool {
        Self::path_in(dir).is_file()
    }

    /// Load the descriptor from `dir`
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        let path = Self::path_in(dir);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::project_not_found(dir.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        debug!("Loaded descriptor from {}", path);
        serde_json::from_str(&content).map_err(|e| Error::config_malformed(DESCRIPTOR_FILE, e))
    }

    /// Write the descriptor into `dir`
    pub fn save(&self, dir: &Utf8Path) -> Result<()> {
        let path = Self::path_in(dir);
        let content = serde_json::to_string(self)
            .map_err(|e| Error::config_malformed(DESCRIPTOR_FILE, e))?;
        fs::write(&path, content)?;
        debug!("Saved descriptor to {}", path);
        Ok(())
    }

    pub fn global_code_enabled(&self) -> bool {
        self.devfeature == Some(DevFeature::GlobalCode)
    }

    /// Record a disk dependency; returns false when it was already present
    pub fn add_diskdep(&mut self, name: &str) -> bool {
        if self.diskdeps.iter().any(|d| d == name) {
            return false;
        }
        self.diskdeps.push(name.to_string());
        true
    }

    /// Drop a disk dependency; returns whether it was present
    pub fn remove_diskdep(&mut self, name: &str) -> bool {
        let before = self.diskdeps.len();
        self.diskdeps.retain(|d| d != name);
        self.diskdeps.len() != before
    }
}
