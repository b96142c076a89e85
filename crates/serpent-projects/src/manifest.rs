//! Package manifest (`pyproject.toml`) access
//!
//! The manifest belongs to the Python packaging ecosystem, so it is held as a
//! raw TOML table: only `project.name`, `project.version`,
//! `project.description` and `project.dependencies` are interpreted, and every
//! other key is written back untouched and in its original order.

use crate::error::{Error, Result};
use crate::types::MANIFEST_FILE;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use toml::{Table, Value};
use tracing::debug;

/// Version given to freshly created projects
pub const INITIAL_VERSION: &str = "1.0.0";

const FLIT_REQUIRES: &str = "flit_core >=3.2,<4";
const FLIT_BACKEND: &str = "flit_core.buildapi";

/// Parsed `pyproject.toml`
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    table: Table,
    /// File name or path used when reporting problems
    origin: String,
}

impl Manifest {
    /// Build the manifest for a new project
    pub fn new(name: &str) -> Self {
        let mut project = Table::new();
        project.insert("name".into(), Value::String(name.to_string()));
        project.insert("version".into(), Value::String(INITIAL_VERSION.into()));
        project.insert("description".into(), Value::String(String::new()));
        project.insert("dependencies".into(), Value::Array(Vec::new()));

        let mut build_system = Table::new();
        build_system.insert(
            "requires".into(),
            Value::Array(vec![Value::String(FLIT_REQUIRES.into())]),
        );
        build_system.insert("build-backend".into(), Value::String(FLIT_BACKEND.into()));

        let mut table = Table::new();
        table.insert("build-system".into(), Value::Table(build_system));
        table.insert("project".into(), Value::Table(project));

        Self {
            table,
            origin: MANIFEST_FILE.to_string(),
        }
    }

    /// Path of the manifest inside `dir`
    pub fn path_in(dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Parse manifest text; `origin` names the file in error messages
    pub fn parse(content: &str, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let table: Table = toml::from_str(content)
            .map_err(|e| Error::config_malformed(origin.clone(), e.message()))?;
        Ok(Self { table, origin })
    }

    /// Load the manifest from a project directory
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        Self::load_from(dir, MANIFEST_FILE)
    }

    /// Read `project.name` from another project on disk
    pub fn read_project_name(dir: &Utf8Path) -> Result<String> {
        let manifest = Self::load_from(dir, Self::path_in(dir).as_str())?;
        manifest.name().map(str::to_string)
    }

    fn load_from(dir: &Utf8Path, origin: &str) -> Result<Self> {
        let path = Self::path_in(dir);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::config_malformed(origin, format!("cannot read {}: {}", path, e)))?;
        debug!("Loaded manifest from {}", path);
        Self::parse(&content, origin)
    }

    /// Write the manifest into `dir`
    pub fn save(&self, dir: &Utf8Path) -> Result<()> {
        let path = Self::path_in(dir);
        let content =
            toml::to_string(&self.table).map_err(|e| Error::config_malformed(&self.origin, e))?;
        fs::write(&path, content)?;
        debug!("Saved manifest to {}", path);
        Ok(())
    }

    pub fn name(&self) -> Result<&str> {
        self.project_str("name")
    }

    pub fn version(&self) -> Result<&str> {
        self.project_str("version")
    }

    pub fn description(&self) -> Result<&str> {
        self.project_str("description")
    }

    /// Entries of `project.dependencies`
    pub fn dependencies(&self) -> Result<Vec<String>> {
        self.dependency_array()?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.malformed("project.dependencies must hold strings"))
            })
            .collect()
    }

    /// Append a dependency; returns false when it is already listed
    pub fn add_dependency(&mut self, spec: &str) -> Result<bool> {
        if self.dependencies()?.iter().any(|d| d == spec) {
            return Ok(false);
        }
        self.dependency_array_mut()?
            .push(Value::String(spec.to_string()));
        Ok(true)
    }

    /// Remove a dependency; returns whether it was listed
    pub fn remove_dependency(&mut self, spec: &str) -> Result<bool> {
        let deps = self.dependency_array_mut()?;
        let before = deps.len();
        deps.retain(|v| v.as_str() != Some(spec));
        Ok(deps.len() != before)
    }

    fn project(&self) -> Result<&Table> {
        self.table
            .get("project")
            .and_then(Value::as_table)
            .ok_or_else(|| self.malformed("missing [project] table"))
    }

    fn project_str(&self, key: &str) -> Result<&str> {
        self.project()?
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.malformed(format!("missing project.{}", key)))
    }

    fn dependency_array(&self) -> Result<&Vec<Value>> {
        self.project()?
            .get("dependencies")
            .and_then(Value::as_array)
            .ok_or_else(|| self.malformed("missing project.dependencies"))
    }

    fn dependency_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        let origin = self.origin.clone();
        self.table
            .get_mut("project")
            .and_then(Value::as_table_mut)
            .and_then(|p| p.get_mut("dependencies"))
            .and_then(Value::as_array_mut)
            .ok_or_else(|| Error::config_malformed(origin, "missing project.dependencies"))
    }

    fn malformed(&self, message: impl ToString) -> Error {
        Error::config_malformed(&self.origin, message)
    }
}
