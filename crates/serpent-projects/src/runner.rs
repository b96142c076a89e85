//! Starting an existing project

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::registry::TemplateRegistry;
use crate::rewriter::GlobalCodeRewriter;
use crate::templates::{RunContext, TemplateCatalog};
use camino::Utf8Path;
use tracing::debug;

/// Run the project in `root` with `args`, returning the program's exit code
///
/// Only `serpent.conf` is read; a missing or broken manifest does not
/// prevent running.
pub fn run_project(
    root: &Utf8Path,
    args: &[String],
    catalog: &TemplateCatalog,
    registry: &TemplateRegistry,
) -> Result<i32> {
    let descriptor = Descriptor::load(root)?;

    if descriptor.global_code_enabled() {
        let report = GlobalCodeRewriter::new(root).rebuild()?;
        debug!("Global code injected into {} files", report.files);
    }

    let resolved = catalog
        .resolve(&descriptor.template, registry)
        .map_err(|e| match e {
            Error::TemplateNotFound { template } => Error::template_not_installed(template),
            other => other,
        })?;

    resolved.run(&RunContext::new(root, &descriptor, args))
}
