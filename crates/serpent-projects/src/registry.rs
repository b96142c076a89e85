//! Installed template registry
//!
//! Tracks the templates installed with `serpent template install`. The file
//! holds one `tag:name` record per line, where the tag is `pkg` for templates
//! installed as `stempl-<name>` packages and `lcl` for templates installed
//! from a project on local disk. Builtin templates are never stored; they are
//! prepended when listing.

use crate::error::{Error, Result};
use crate::types::{is_builtin, TemplateKind, BUILTIN_TEMPLATES};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::fs;
use std::str::FromStr;
use tracing::{debug, warn};

/// Registry file name inside the tool home
pub const REGISTRY_FILE: &str = "templates.lst";

/// One installed template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryEntry {
    pub name: String,
    pub kind: TemplateKind,
}

impl RegistryEntry {
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Package,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Local,
        }
    }
}

impl fmt::Display for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.tag() {
            Some(tag) => write!(f, "{}:{}", tag, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for RegistryEntry {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let (tag, name) = line
            .split_once(':')
            .ok_or_else(|| format!("expected `tag:name`, got `{}`", line))?;
        let kind =
            TemplateKind::from_tag(tag).ok_or_else(|| format!("unknown template tag `{}`", tag))?;
        if name.is_empty() {
            return Err(format!("empty template name in `{}`", line));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
        })
    }
}

/// The persisted list of installed templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    path: Utf8PathBuf,
    entries: Vec<RegistryEntry>,
}

impl TemplateRegistry {
    /// Empty registry backed by `path`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the registry; a missing file is an empty registry
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No template registry at {}, starting empty", path);
                return Ok(Self::new(path));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut registry = Self::new(path);
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let entry: RegistryEntry = line.parse().map_err(|e| {
                Error::config_malformed(path.as_str(), format!("line {}: {}", index + 1, e))
            })?;

            if is_builtin(&entry.name) {
                warn!("Ignoring builtin template {} found in {}", entry, path);
                continue;
            }
            if !registry.entries.contains(&entry) {
                registry.entries.push(entry);
            }
        }

        debug!("Loaded {} templates from {}", registry.entries.len(), path);
        Ok(registry)
    }

    /// Write the registry back to its file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content: String = self
            .entries
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect();
        fs::write(&self.path, content)?;
        debug!("Saved {} templates to {}", self.entries.len(), self.path);
        Ok(())
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Persisted entries, in installation order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Every known template: builtins first, then installed ones
    pub fn list(&self) -> Vec<(String, TemplateKind)> {
        BUILTIN_TEMPLATES
            .iter()
            .map(|name| (name.to_string(), TemplateKind::Builtin))
            .chain(self.entries.iter().map(|e| (e.name.clone(), e.kind)))
            .collect()
    }

    pub fn contains(&self, name: &str, kind: TemplateKind) -> bool {
        self.entries.iter().any(|e| e.name == name && e.kind == kind)
    }

    /// Installed entry for `name`, package entries before local ones
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        [TemplateKind::Package, TemplateKind::Local]
            .into_iter()
            .find_map(|kind| self.entries.iter().find(|e| e.name == name && e.kind == kind))
    }

    /// Record an installed template; returns false when already present
    pub fn add(&mut self, entry: RegistryEntry) -> Result<bool> {
        if is_builtin(&entry.name) {
            return Err(Error::builtin_template(entry.name));
        }
        if self.entries.contains(&entry) {
            return Ok(false);
        }
        self.entries.push(entry);
        Ok(true)
    }

    /// Forget an installed template; returns whether it was present
    pub fn remove(&mut self, name: &str, kind: TemplateKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.name == name && e.kind == kind));
        self.entries.len() != before
    }
}
