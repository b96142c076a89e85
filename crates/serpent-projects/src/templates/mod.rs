//! Project template system for the Serpent CLI.
//!
//! A template is anything implementing [`TemplateHandler`]: a `create` hook
//! that lays out a new project and a `run` hook that starts it. Handlers come
//! from three places:
//!
//! - `builtin`: `console`, `lib` and `template`, always available
//! - `bundled`: packs compiled into the tool (`flask`, `webpy`) that back
//!   package entries of the registry
//! - `module`: Python modules installed with `serpent template install`,
//!   driven through the tool's interpreter
//!
//! [`manage`] installs and removes packs and keeps the registry in step.
//!
//! # Resolution
//!
//! [`TemplateCatalog::resolve`] looks a name up in order:
//!
//! 1. builtin names, exact match
//! 2. a `pkg:` registry entry: the bundled pack of that name if compiled in,
//!    otherwise the `stempl_<name>` module
//! 3. an `lcl:` registry entry: the `<name>` module
//!
//! # Example Usage
//!
//! ```no_run
//! use serpent_projects::registry::TemplateRegistry;
//! use serpent_projects::templates::TemplateCatalog;
//! use camino::Utf8Path;
//!
//! let registry = TemplateRegistry::load(Utf8Path::new("/home/me/.serpent/templates.lst")).unwrap();
//! let catalog = TemplateCatalog::with_defaults();
//!
//! let resolved = catalog.resolve("console", &registry).unwrap();
//! assert!(resolved.handler.runnable());
//! ```

pub mod builtin;
pub mod bundled;
pub mod manage;
pub mod module;

pub use builtin::{ConsoleTemplate, LibTemplate, TemplatePackTemplate};
pub use bundled::{FlaskTemplate, WebPyTemplate};
pub use module::ModuleTemplate;

use crate::deps::{self, Added};
use crate::descriptor::Descriptor;
use crate::error::{Error, HandlerError, Result};
use crate::project::{self, Project};
use crate::registry::TemplateRegistry;
use crate::toolchain::{executable, venv_bin_dir, Interpreter, PackageInstaller};
use crate::types::{TemplateKind, GENERATED_RUN_DIR};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};

/// A template's two hooks
pub trait TemplateHandler: Send + Sync {
    /// Name the template is selected by
    fn name(&self) -> &str;

    /// One-line summary for listings
    fn description(&self) -> &str {
        ""
    }

    /// Whether projects of this template can be started with `serpent run`
    fn runnable(&self) -> bool {
        true
    }

    /// Lay out a new project in `ctx.root()`
    fn create(&self, ctx: &mut CreateContext<'_>) -> std::result::Result<(), HandlerError>;

    /// Start the project, returning the program's exit code
    fn run(&self, ctx: &RunContext<'_>) -> std::result::Result<i32, HandlerError>;
}

/// What a `create` hook works with
pub struct CreateContext<'a> {
    project: &'a mut Project,
    installer: &'a dyn PackageInstaller,
}

impl<'a> CreateContext<'a> {
    pub fn new(project: &'a mut Project, installer: &'a dyn PackageInstaller) -> Self {
        Self { project, installer }
    }

    pub fn root(&self) -> &Utf8Path {
        self.project.root()
    }

    /// Name of the new project (its directory name)
    pub fn project_name(&self) -> &str {
        self.project.dir_name()
    }

    pub fn project(&self) -> &Project {
        self.project
    }

    /// Write `contents` to a path relative to the project root, creating
    /// parent directories
    pub fn write_file(&self, rel: &str, contents: &str) -> std::io::Result<()> {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing {}", path);
        fs::write(path, contents)
    }

    /// Create a directory relative to the project root
    pub fn create_dir(&self, rel: &str) -> std::io::Result<()> {
        fs::create_dir_all(self.root().join(rel))
    }

    /// Executable installed into the project's virtual environment
    pub fn venv_tool(&self, name: &str) -> Utf8PathBuf {
        venv_bin_dir(self.root()).join(executable(name))
    }

    /// Install and record dependencies the template needs
    pub fn add_dependencies(&mut self, names: &[&str]) -> Result<Vec<Added>> {
        deps::add(self.project, self.installer, names)
    }
}

/// What a `run` hook works with
///
/// Running needs only the descriptor; the manifest is never read.
pub struct RunContext<'a> {
    root: &'a Utf8Path,
    pub descriptor: &'a Descriptor,
    /// Interpreter of the project's virtual environment
    pub python: Interpreter,
    /// Extra arguments given after `serpent run`
    pub args: &'a [String],
}

impl<'a> RunContext<'a> {
    pub fn new(root: &'a Utf8Path, descriptor: &'a Descriptor, args: &'a [String]) -> Self {
        Self {
            root,
            descriptor,
            python: Interpreter::venv(root),
            args,
        }
    }

    /// Context for a fully loaded project
    pub fn for_project(project: &'a Project, args: &'a [String]) -> Self {
        Self::new(project.root(), &project.descriptor, args)
    }

    pub fn root(&self) -> &Utf8Path {
        self.root
    }

    /// Where sources are read from (the rewritten tree under global code)
    pub fn source_root(&self) -> Utf8PathBuf {
        project::source_root(self.root, self.descriptor)
    }
}

/// A template resolved by name
#[derive(Clone)]
pub struct ResolvedTemplate {
    pub name: String,
    pub kind: TemplateKind,
    pub handler: Arc<dyn TemplateHandler>,
}

impl std::fmt::Debug for ResolvedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedTemplate")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl ResolvedTemplate {
    /// Run the creation hook
    pub fn create(&self, ctx: &mut CreateContext<'_>) -> Result<()> {
        info!("Running create hook of {} template {}", self.kind, self.name);
        self.handler.create(ctx).map_err(Error::from)
    }

    /// Run the run hook; non-runnable templates are refused
    pub fn run(&self, ctx: &RunContext<'_>) -> Result<i32> {
        if !self.handler.runnable() {
            let built_into = ctx
                .descriptor
                .global_code_enabled()
                .then(|| GENERATED_RUN_DIR.to_string());
            return Err(Error::TemplateNotRunnable {
                template: self.name.clone(),
                built_into,
            });
        }
        info!("Running run hook of {} template {}", self.kind, self.name);
        self.handler.run(ctx).map_err(Error::from)
    }
}

/// The plugin registry: every compiled-in handler, plus the interpreter
/// used for module templates
pub struct TemplateCatalog {
    builtins: BTreeMap<String, Arc<dyn TemplateHandler>>,
    bundled: BTreeMap<String, Arc<dyn TemplateHandler>>,
    module_python: Option<Interpreter>,
}

impl TemplateCatalog {
    /// A catalog with no handlers at all
    pub fn empty() -> Self {
        Self {
            builtins: BTreeMap::new(),
            bundled: BTreeMap::new(),
            module_python: None,
        }
    }

    /// Builtins plus the bundled packs
    pub fn with_defaults() -> Self {
        let mut catalog = Self::empty();
        catalog.register_builtin(Arc::new(ConsoleTemplate));
        catalog.register_builtin(Arc::new(LibTemplate));
        catalog.register_builtin(Arc::new(TemplatePackTemplate));
        catalog.register(Arc::new(FlaskTemplate));
        catalog.register(Arc::new(WebPyTemplate));
        catalog
    }

    /// Interpreter that imports module templates
    pub fn with_module_interpreter(mut self, python: Option<Interpreter>) -> Self {
        self.module_python = python;
        self
    }

    fn register_builtin(&mut self, handler: Arc<dyn TemplateHandler>) {
        self.builtins.insert(handler.name().to_string(), handler);
    }

    /// Register a compiled-in pack; it serves `pkg:<name>` registry entries
    pub fn register(&mut self, handler: Arc<dyn TemplateHandler>) {
        debug!("Registered bundled template {}", handler.name());
        self.bundled.insert(handler.name().to_string(), handler);
    }

    /// Whether a pack of this name is compiled in
    pub fn is_bundled(&self, name: &str) -> bool {
        self.bundled.contains_key(name)
    }

    /// Names of the compiled-in packs
    pub fn bundled_names(&self) -> Vec<String> {
        self.bundled.keys().cloned().collect()
    }

    /// Find the handler for `name`
    pub fn resolve(&self, name: &str, registry: &TemplateRegistry) -> Result<ResolvedTemplate> {
        if let Some(handler) = self.builtins.get(name) {
            return Ok(self.resolved(name, TemplateKind::Builtin, handler.clone()));
        }

        if registry.contains(name, TemplateKind::Package) {
            let handler = match self.bundled.get(name) {
                Some(handler) => handler.clone(),
                None => Arc::new(ModuleTemplate::package(name, self.module_python.clone())),
            };
            return Ok(self.resolved(name, TemplateKind::Package, handler));
        }

        if registry.contains(name, TemplateKind::Local) {
            let handler = Arc::new(ModuleTemplate::local(name, self.module_python.clone()));
            return Ok(self.resolved(name, TemplateKind::Local, handler));
        }

        Err(Error::template_not_found(name))
    }

    fn resolved(
        &self,
        name: &str,
        kind: TemplateKind,
        handler: Arc<dyn TemplateHandler>,
    ) -> ResolvedTemplate {
        debug!("Resolved template {} as {}", name, kind);
        ResolvedTemplate {
            name: name.to_string(),
            kind,
            handler,
        }
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
