//! Dependency management for a loaded project
//!
//! Published packages live in the manifest's `project.dependencies`. Projects
//! referenced by a local path have no stable published version, so they are
//! installed editable and recorded by name in the descriptor's `diskdeps`.
//!
//! The functions act on one name at a time and only mutate the in-memory
//! [`Project`]; callers save it once the batch is done, including when a
//! later name fails, so earlier successes stay recorded.

use crate::error::Result;
use crate::manifest::Manifest;
use crate::project::Project;
use crate::toolchain::PackageInstaller;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::{debug, info};

/// What `add` did with one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Added {
    /// Installed from the package index and listed in the manifest
    Package { name: String, newly_listed: bool },
    /// Installed editable from disk and recorded as a disk dependency
    Disk { path: Utf8PathBuf, project: String },
}

/// What `upgrade` did with one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upgraded {
    Upgraded(String),
    /// Local paths are never upgraded
    SkippedLocal(String),
}

/// Where `remove` found the name after uninstalling it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    Manifest,
    DiskDependency,
    /// Uninstalled, but neither list mentioned it
    Unlisted,
}

/// The output of `serpent deps list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyListing {
    pub libraries: Vec<String>,
    pub references: Vec<String>,
}

impl fmt::Display for DependencyListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Libraries:")?;
        for lib in &self.libraries {
            writeln!(f, "  {}", lib)?;
        }
        writeln!(f, "Project References:")?;
        for reference in &self.references {
            writeln!(f, "  {}", reference)?;
        }
        Ok(())
    }
}

/// Resolve `name` as a path relative to the project root, if it exists
pub fn local_path(root: &Utf8Path, name: &str) -> Option<Utf8PathBuf> {
    let candidate = root.join(name);
    candidate.exists().then_some(candidate)
}

/// Install one dependency and record it
pub fn add_one(
    project: &mut Project,
    installer: &dyn PackageInstaller,
    name: &str,
) -> Result<Added> {
    if let Some(path) = local_path(project.root(), name) {
        installer.install_editable(&path)?;
        let other = Manifest::read_project_name(&path)?;
        if project.descriptor.add_diskdep(&other) {
            info!("Recorded disk dependency {} ({})", other, path);
        }
        return Ok(Added::Disk {
            path,
            project: other,
        });
    }

    installer.install(name)?;
    let newly_listed = project.manifest.add_dependency(name)?;
    debug!("Dependency {} listed: {}", name, newly_listed);
    Ok(Added::Package {
        name: name.to_string(),
        newly_listed,
    })
}

/// Install and record every name, stopping at the first failure
pub fn add<S: AsRef<str>>(
    project: &mut Project,
    installer: &dyn PackageInstaller,
    names: &[S],
) -> Result<Vec<Added>> {
    names
        .iter()
        .map(|name| add_one(project, installer, name.as_ref()))
        .collect()
}

/// Names `upgrade` acts on: the given ones, or every manifest dependency
pub fn upgrade_targets(project: &Project, names: &[String]) -> Result<Vec<String>> {
    if names.is_empty() {
        project.manifest.dependencies()
    } else {
        Ok(names.to_vec())
    }
}

/// Upgrade one dependency; local paths are skipped
pub fn upgrade_one(
    project: &Project,
    installer: &dyn PackageInstaller,
    name: &str,
) -> Result<Upgraded> {
    if local_path(project.root(), name).is_some() {
        debug!("Skipping upgrade of local path {}", name);
        return Ok(Upgraded::SkippedLocal(name.to_string()));
    }
    installer.upgrade(name)?;
    Ok(Upgraded::Upgraded(name.to_string()))
}

/// Uninstall one dependency and drop it from whichever list holds it
pub fn remove_one(
    project: &mut Project,
    installer: &dyn PackageInstaller,
    name: &str,
) -> Result<Removed> {
    installer.uninstall(name)?;

    if project.manifest.remove_dependency(name)? {
        return Ok(Removed::Manifest);
    }
    if project.descriptor.remove_diskdep(name) {
        return Ok(Removed::DiskDependency);
    }
    Ok(Removed::Unlisted)
}

/// Both dependency groups of a project
pub fn list(project: &Project) -> Result<DependencyListing> {
    Ok(DependencyListing {
        libraries: project.manifest.dependencies()?,
        references: project.descriptor.diskdeps.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_format() {
        let listing = DependencyListing {
            libraries: vec!["flask".to_string(), "requests".to_string()],
            references: vec!["shared-utils".to_string()],
        };
        assert_eq!(
            listing.to_string(),
            "Libraries:\n  flask\n  requests\nProject References:\n  shared-utils\n"
        );
    }

    #[test]
    fn test_empty_listing_keeps_headers() {
        let listing = DependencyListing::default();
        assert_eq!(listing.to_string(), "Libraries:\nProject References:\n");
    }
}
