//! A loaded project: its root plus the descriptor and manifest
//!
//! Commands load a `Project` once on entry, pass it down by reference while
//! they work, and save it once on exit.

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::toolchain::Interpreter;
use crate::types::{GENERATED_RUN_DIR, GLOBAL_CODE_FILE};
use camino::{Utf8Path, Utf8PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    root: Utf8PathBuf,
    pub descriptor: Descriptor,
    pub manifest: Manifest,
}

impl Project {
    pub fn new(root: impl Into<Utf8PathBuf>, descriptor: Descriptor, manifest: Manifest) -> Self {
        Self {
            root: root.into(),
            descriptor,
            manifest,
        }
    }

    /// Load the project in `root`; the descriptor must exist
    pub fn load(root: &Utf8Path) -> Result<Self> {
        let descriptor = Descriptor::load(root)?;
        let manifest = Manifest::load(root)?;
        Ok(Self::new(root, descriptor, manifest))
    }

    /// Fail unless `root` holds a project descriptor
    pub fn require(root: &Utf8Path) -> Result<()> {
        if Descriptor::exists_in(root) {
            Ok(())
        } else {
            Err(Error::project_not_found(root.as_str()))
        }
    }

    /// Write descriptor and manifest
    pub fn save(&self) -> Result<()> {
        self.descriptor.save(&self.root)?;
        self.manifest.save(&self.root)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Project name, taken from the directory name
    pub fn dir_name(&self) -> &str {
        dir_name(&self.root)
    }

    pub fn template(&self) -> &str {
        &self.descriptor.template
    }

    /// Interpreter of the project's virtual environment
    pub fn interpreter(&self) -> Interpreter {
        Interpreter::venv(&self.root)
    }

    /// Directory the program runs from: the rewritten tree when global code
    /// injection is on, else the project root
    pub fn source_root(&self) -> Utf8PathBuf {
        source_root(&self.root, &self.descriptor)
    }

    pub fn global_code_path(&self) -> Utf8PathBuf {
        self.root.join(GLOBAL_CODE_FILE)
    }
}

/// Where a project's sources are read from at run time
pub fn source_root(root: &Utf8Path, descriptor: &Descriptor) -> Utf8PathBuf {
    if descriptor.global_code_enabled() {
        root.join(GENERATED_RUN_DIR)
    } else {
        root.to_path_buf()
    }
}

/// Last component of a directory path, `project` when there is none
pub fn dir_name(root: &Utf8Path) -> &str {
    root.file_name().unwrap_or("project")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DevFeature;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().join("demo")).unwrap();
        std::fs::create_dir(&root).unwrap();

        let project = Project::new(
            &root,
            Descriptor::new("console", None),
            Manifest::new("demo"),
        );
        project.save().unwrap();

        let loaded = Project::load(&root).unwrap();
        assert_eq!(loaded.template(), "console");
        assert_eq!(loaded.dir_name(), "demo");
        assert_eq!(loaded.manifest.name().unwrap(), "demo");
    }

    #[test]
    fn test_source_root_follows_dev_feature() {
        let plain = Project::new(
            "/work/demo",
            Descriptor::new("console", None),
            Manifest::new("demo"),
        );
        assert_eq!(plain.source_root(), "/work/demo");

        let injected = Project::new(
            "/work/demo",
            Descriptor::new("console", Some(DevFeature::GlobalCode)),
            Manifest::new("demo"),
        );
        assert_eq!(injected.source_root(), "/work/demo/generated/run");
    }

    #[test]
    fn test_load_without_descriptor() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        assert!(matches!(
            Project::load(&root).unwrap_err(),
            Error::ProjectNotFound { .. }
        ));
        assert!(Project::require(&root).is_err());
    }
}
