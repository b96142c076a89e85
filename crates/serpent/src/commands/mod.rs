//! CLI command implementations
//!
//! Each handler returns the process exit code on success. Errors bubble up
//! to `main`, which prints them and exits 1.

pub mod deps;
pub mod new;
pub mod run;
pub mod template;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use serpent_projects::config::ToolConfig;
use serpent_projects::registry::TemplateRegistry;
use serpent_projects::templates::TemplateCatalog;

use crate::utils;

/// What every command works from
pub struct Session {
    /// Project directory
    pub root: Utf8PathBuf,
    pub config: ToolConfig,
}

impl Session {
    /// Resolve the working directory and tool configuration
    pub fn from_env() -> Result<Self> {
        let root = utils::current_dir()?;
        let config = ToolConfig::from_env().context("Failed to resolve tool configuration")?;
        Ok(Self { root, config })
    }

    /// Installed-template registry
    pub fn registry(&self) -> Result<TemplateRegistry> {
        let path = self.config.registry_path();
        TemplateRegistry::load(&path)
            .with_context(|| format!("Failed to load template registry {}", path))
    }

    /// Builtins, bundled packs and, when an interpreter is found, module
    /// templates
    pub fn catalog(&self) -> TemplateCatalog {
        let python = match self.config.interpreter() {
            Ok(python) => Some(python),
            Err(e) => {
                tracing::debug!("Module templates unavailable: {}", e);
                None
            }
        };
        TemplateCatalog::with_defaults().with_module_interpreter(python)
    }
}
