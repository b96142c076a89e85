//! Installing and removing template packs
//!
//! Installs go through the tool's own interpreter, never a project venv.
//! Callers save the registry once the batch is done.

use super::TemplateCatalog;
use crate::deps::local_path;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::registry::{RegistryEntry, TemplateRegistry};
use crate::toolchain::PackageInstaller;
use crate::types::{is_builtin, TemplateKind};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Where an installed template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSource {
    /// Compiled into the tool; nothing was installed
    Bundled,
    /// `stempl-<name>` from the package index
    Index,
    /// A template project on disk
    Disk(Utf8PathBuf),
}

/// Outcome of installing one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub entry: RegistryEntry,
    pub source: InstallSource,
    /// False when the registry already held the entry
    pub newly_added: bool,
}

/// Distribution name of a published template pack
pub fn package_name(name: &str) -> String {
    format!("stempl-{}", name)
}

/// Install one template and record it in `registry`
///
/// `name` is treated as a path when it exists relative to `cwd`.
pub fn install(
    registry: &mut TemplateRegistry,
    catalog: &TemplateCatalog,
    installer: &dyn PackageInstaller,
    cwd: &Utf8Path,
    name: &str,
) -> Result<Installed> {
    if is_builtin(name) {
        return Err(Error::builtin_template(name));
    }

    let (entry, source) = if let Some(path) = local_path(cwd, name) {
        installer.install(path.as_str())?;
        let project = Manifest::read_project_name(&path)?;
        (RegistryEntry::local(project), InstallSource::Disk(path))
    } else if catalog.is_bundled(name) {
        debug!("{} is bundled, skipping pip", name);
        (RegistryEntry::package(name), InstallSource::Bundled)
    } else {
        installer.install(&package_name(name))?;
        (RegistryEntry::package(name), InstallSource::Index)
    };

    let newly_added = registry.add(entry.clone())?;
    info!("Registered template {}", entry);
    Ok(Installed {
        entry,
        source,
        newly_added,
    })
}

/// Uninstall one template and drop it from `registry`
///
/// Returns `None` when no entry of that name is registered.
pub fn remove(
    registry: &mut TemplateRegistry,
    catalog: &TemplateCatalog,
    installer: &dyn PackageInstaller,
    name: &str,
) -> Result<Option<RegistryEntry>> {
    if is_builtin(name) {
        return Err(Error::builtin_template(name));
    }

    let Some(entry) = registry.find(name).cloned() else {
        return Ok(None);
    };

    match entry.kind {
        TemplateKind::Package if catalog.is_bundled(name) => {
            debug!("{} is bundled, skipping pip", name);
        }
        TemplateKind::Package => installer.uninstall(&package_name(name))?,
        _ => installer.uninstall(name)?,
    }

    registry.remove(&entry.name, entry.kind);
    info!("Unregistered template {}", entry);
    Ok(Some(entry))
}
