//! Serpent CLI - Python project scaffolding and dependency management
//!
//! This is the main entry point for the Serpent command-line interface.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::Session;

fn main() -> ExitCode {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    match dispatch(cli) {
        Ok(code) => exit_code(code),
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command, returning the process exit code
fn dispatch(cli: Cli) -> Result<i32> {
    if let Some(dir) = &cli.directory {
        utils::change_dir(dir)?;
    }
    let session = Session::from_env()?;

    match cli.command {
        Commands::New(args) => commands::new::run(args, &session),
        Commands::Run(args) => commands::run::run(args, &session),
        Commands::Deps(cmd) => commands::deps::run(cmd, &session),
        Commands::Template(cmd) => commands::template::run(cmd, &session),
    }
}

/// Map a program's exit status onto ours; out-of-range codes become 1
fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Default to warn so command output stays readable
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
