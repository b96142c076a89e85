//! `serpent deps` command handlers
//!
//! The project is loaded once and saved once. A batch stops at the first
//! failing name, but the names handled before it stay recorded.

use anyhow::{Context, Result};
use serpent_projects::deps::{self, Added, Removed, Upgraded};
use serpent_projects::project::Project;
use serpent_projects::toolchain::Pip;

use super::Session;
use crate::cli::DepsCommands;
use crate::output;

/// Run deps subcommands
pub fn run(cmd: DepsCommands, session: &Session) -> Result<i32> {
    let mut project = Project::load(&session.root)?;

    if let DepsCommands::List = cmd {
        print!("{}", deps::list(&project)?);
        return Ok(0);
    }

    let installer = Pip::for_project(project.root());
    let result = match cmd {
        DepsCommands::Add(args) => add(&mut project, &installer, &args.names),
        DepsCommands::Remove(args) => remove(&mut project, &installer, &args.names),
        DepsCommands::Upgrade(args) => upgrade(&project, &installer, &args.names),
        DepsCommands::List => Ok(()),
    };

    let saved = project.save().context("Failed to save project state");
    result?;
    saved?;
    Ok(0)
}

fn add(project: &mut Project, installer: &Pip, names: &[String]) -> Result<()> {
    for name in names {
        match deps::add_one(project, installer, name)? {
            Added::Package { name, newly_listed } => {
                output::success(&format!("Installed {}", name));
                if !newly_listed {
                    output::info(&format!("{} was already listed in pyproject.toml", name));
                }
            }
            Added::Disk { path, project: other } => {
                output::success(&format!("Installed {} from {}", other, path));
                output::warning(&format!(
                    "{} is referenced by path and is not reflected in pyproject.toml",
                    other
                ));
            }
        }
    }
    Ok(())
}

fn upgrade(project: &Project, installer: &Pip, names: &[String]) -> Result<()> {
    let targets = deps::upgrade_targets(project, names)?;
    if targets.is_empty() {
        output::info("No dependencies to upgrade");
        return Ok(());
    }

    for name in &targets {
        match deps::upgrade_one(project, installer, name)? {
            Upgraded::Upgraded(name) => output::success(&format!("Upgraded {}", name)),
            Upgraded::SkippedLocal(name) => {
                output::info(&format!("Skipping {}: local projects are not upgraded", name))
            }
        }
    }
    Ok(())
}

fn remove(project: &mut Project, installer: &Pip, names: &[String]) -> Result<()> {
    for name in names {
        match deps::remove_one(project, installer, name)? {
            Removed::Manifest | Removed::DiskDependency => {
                output::success(&format!("Removed {}", name))
            }
            Removed::Unlisted => output::warning(&format!(
                "{} was uninstalled but is not listed in the project",
                name
            )),
        }
    }
    Ok(())
}
