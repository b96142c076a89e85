//! `serpent run` command handler

use anyhow::Result;
use serpent_projects::runner;

use super::Session;
use crate::cli::RunArgs;

/// Run the project, returning the program's exit code
pub fn run(args: RunArgs, session: &Session) -> Result<i32> {
    let registry = session.registry()?;
    let catalog = session.catalog();
    let code = runner::run_project(&session.root, &args.args, &catalog, &registry)?;
    tracing::info!("Program exited with code {}", code);
    Ok(code)
}
