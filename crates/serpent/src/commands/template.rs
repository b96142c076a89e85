//! `serpent template` command handlers

use anyhow::{Context, Result};
use serpent_projects::registry::TemplateRegistry;
use serpent_projects::templates::manage::{self, InstallSource};
use serpent_projects::templates::TemplateCatalog;
use serpent_projects::toolchain::Pip;

use super::Session;
use crate::cli::TemplateCommands;
use crate::output;
use crate::utils::plural;

/// Run template subcommands
pub fn run(cmd: TemplateCommands, session: &Session) -> Result<i32> {
    let mut registry = session.registry()?;

    let (names, installing) = match &cmd {
        TemplateCommands::List => {
            list(&registry);
            return Ok(0);
        }
        TemplateCommands::Install(args) => (&args.names, true),
        TemplateCommands::Remove(args) => (&args.names, false),
    };

    let catalog = session.catalog();
    let installer = Pip::new(session.config.interpreter()?);
    let result = if installing {
        install(&mut registry, &catalog, &installer, session, names)
    } else {
        remove(&mut registry, &catalog, &installer, names)
    };

    let saved = registry
        .save()
        .with_context(|| format!("Failed to save template registry {}", registry.path()));
    result?;
    saved?;
    Ok(0)
}

fn list(registry: &TemplateRegistry) {
    println!("List of project templates:");
    for (name, kind) in registry.list() {
        println!("  {} <{}>", name, kind);
    }
}

fn install(
    registry: &mut TemplateRegistry,
    catalog: &TemplateCatalog,
    installer: &Pip,
    session: &Session,
    names: &[String],
) -> Result<()> {
    let mut added = 0;
    for name in names {
        let installed = manage::install(registry, catalog, installer, &session.root, name)?;
        if !installed.newly_added {
            output::info(&format!("Template {} is already installed", installed.entry.name));
            continue;
        }
        added += 1;
        match installed.source {
            InstallSource::Disk(path) => output::success(&format!(
                "Installed template {} from {}",
                installed.entry.name, path
            )),
            InstallSource::Bundled | InstallSource::Index => {
                output::success(&format!("Installed template {}", installed.entry.name))
            }
        }
    }
    tracing::info!("{} added", plural(added, "template", "templates"));
    Ok(())
}

fn remove(
    registry: &mut TemplateRegistry,
    catalog: &TemplateCatalog,
    installer: &Pip,
    names: &[String],
) -> Result<()> {
    for name in names {
        match manage::remove(registry, catalog, installer, name)? {
            Some(entry) => output::success(&format!("Removed template {}", entry.name)),
            None => output::warning(&format!("Template {} is not installed, skipping", name)),
        }
    }
    Ok(())
}
