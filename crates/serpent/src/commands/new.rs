//! `serpent new` command handler

use anyhow::Result;
use camino::Utf8Path;
use serpent_projects::scaffold::{self, NewProject};
use serpent_projects::toolchain::{EnvironmentCreator, Pip, Venv};

use super::Session;
use crate::cli::NewArgs;
use crate::output;

/// Shows a spinner while the wrapped creator runs
struct WithSpinner<E>(E);

impl<E: EnvironmentCreator> EnvironmentCreator for WithSpinner<E> {
    fn create(&self, project_dir: &Utf8Path) -> serpent_projects::Result<()> {
        let spinner = output::spinner("Creating virtual environment...");
        let result = self.0.create(project_dir);
        spinner.finish_and_clear();
        result
    }
}

/// Create a new project in the session directory
pub fn run(args: NewArgs, session: &Session) -> Result<i32> {
    let root = &session.root;
    // refuse early, before looking for an interpreter
    scaffold::check_target(root)?;

    let registry = session.registry()?;
    let catalog = session.catalog();
    catalog.resolve(&args.template, &registry)?;
    let environment = WithSpinner(Venv::new(session.config.interpreter()?));
    let installer = Pip::for_project(root);

    let request = NewProject::new(&args.template).with_devfeature(args.development_feature);
    let project = scaffold::create_project(
        root,
        &request,
        &catalog,
        &registry,
        &environment,
        &installer,
    )?;

    output::success(&format!(
        "Created {} project {}",
        args.template,
        project.dir_name()
    ));
    output::kv("Location", root.as_str());
    if let Some(feature) = project.descriptor.devfeature {
        output::kv("Development feature", feature.as_str());
        output::info(&format!(
            "Shared code goes in {}",
            project.global_code_path()
        ));
    }
    Ok(0)
}
