//! # serpent-projects
//!
//! Project management library for the Serpent CLI providing:
//! - Project descriptors (`serpent.conf`) and manifests (`pyproject.toml`)
//! - The template registry and template handlers
//! - Dependency management through pip
//! - Global-code injection for projects that opt into it
//!
//! Nothing here is async. Every external tool is a blocking subprocess
//! reached through the traits in [`toolchain`].
//!
//! # Examples
//!
//! ## Create a console project
//!
//! ```no_run
//! use serpent_projects::config::ToolConfig;
//! use serpent_projects::registry::TemplateRegistry;
//! use serpent_projects::scaffold::{create_project, NewProject};
//! use serpent_projects::templates::TemplateCatalog;
//! use serpent_projects::toolchain::{Pip, Venv};
//! use camino::Utf8Path;
//!
//! # fn example() -> serpent_projects::Result<()> {
//! let config = ToolConfig::from_env()?;
//! let registry = TemplateRegistry::load(&config.registry_path())?;
//! let catalog = TemplateCatalog::with_defaults();
//!
//! let root = Utf8Path::new("/tmp/hello");
//! create_project(
//!     root,
//!     &NewProject::new("console"),
//!     &catalog,
//!     &registry,
//!     &Venv::new(config.interpreter()?),
//!     &Pip::for_project(root),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Add a dependency
//!
//! ```no_run
//! use serpent_projects::deps;
//! use serpent_projects::project::Project;
//! use serpent_projects::toolchain::Pip;
//! use camino::Utf8Path;
//!
//! # fn example() -> serpent_projects::Result<()> {
//! let root = Utf8Path::new("/tmp/hello");
//! let mut project = Project::load(root)?;
//! let result = deps::add(&mut project, &Pip::for_project(root), &["requests"]);
//! project.save()?;
//! result?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod deps;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod project;
pub mod registry;
pub mod rewriter;
pub mod runner;
pub mod scaffold;
pub mod templates;
pub mod toolchain;
pub mod types;

pub use error::{Error, HandlerError, Result};

// Re-export the types commands work with
pub use project::Project;
pub use registry::{RegistryEntry, TemplateRegistry};
pub use templates::{TemplateCatalog, TemplateHandler};
