//! Creating a new project in an empty directory
//!
//! Every check that can fail on user input (existing project, non-empty
//! directory, unknown template) runs before anything is written.

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::project::{dir_name, Project};
use crate::registry::TemplateRegistry;
use crate::rewriter::GlobalCodeRewriter;
use crate::templates::{CreateContext, TemplateCatalog, TemplatePackTemplate};
use crate::toolchain::{EnvironmentCreator, PackageInstaller};
use crate::types::DevFeature;
use camino::Utf8Path;
use std::fs;
use tracing::info;

/// Options of `serpent new`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub template: String,
    pub devfeature: Option<DevFeature>,
}

impl NewProject {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            devfeature: None,
        }
    }

    pub fn with_devfeature(mut self, devfeature: Option<DevFeature>) -> Self {
        self.devfeature = devfeature;
        self
    }
}

/// Fail if `root` already holds a project or anything else
pub fn check_target(root: &Utf8Path) -> Result<()> {
    if Descriptor::exists_in(root) {
        return Err(Error::project_exists(root.as_str()));
    }
    if fs::read_dir(root)?.next().is_some() {
        return Err(Error::directory_not_empty(root.as_str()));
    }
    Ok(())
}

/// Manifest project name for a new project
pub fn manifest_name(template: &str, dir: &str) -> String {
    if template == "template" {
        TemplatePackTemplate::package_name(dir)
    } else {
        dir.to_string()
    }
}

/// Lay out a new project in `root`
///
/// The project state is saved even when the template's creation hook fails,
/// so dependencies it already installed stay recorded.
pub fn create_project(
    root: &Utf8Path,
    request: &NewProject,
    catalog: &TemplateCatalog,
    registry: &TemplateRegistry,
    environment: &dyn EnvironmentCreator,
    installer: &dyn PackageInstaller,
) -> Result<Project> {
    check_target(root)?;
    let resolved = catalog.resolve(&request.template, registry)?;

    environment.create(root)?;

    let name = manifest_name(&request.template, dir_name(root));
    let mut project = Project::new(
        root,
        Descriptor::new(&request.template, request.devfeature),
        Manifest::new(&name),
    );
    project.save()?;

    if project.descriptor.global_code_enabled() {
        GlobalCodeRewriter::new(root).scaffold()?;
    }

    let outcome = {
        let mut ctx = CreateContext::new(&mut project, installer);
        resolved.create(&mut ctx)
    };
    project.save()?;
    outcome?;

    info!("Created {} project {} in {}", request.template, name, root);
    Ok(project)
}
