//! External Python tooling: interpreters, the package installer and the
//! virtual environment creator.
//!
//! Everything here shells out and waits. The traits are the seam commands are
//! written against, so tests can record calls instead of running pip.

use crate::error::{Error, Result};
use crate::types::VENV_DIR;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// A Python interpreter on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    path: Utf8PathBuf,
}

impl Interpreter {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The interpreter inside a project's virtual environment
    pub fn venv(project_dir: &Utf8Path) -> Self {
        Self::new(venv_bin_dir(project_dir).join(executable("python")))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// A command running this interpreter
    pub fn command(&self) -> Command {
        Command::new(self.path.as_std_path())
    }

    /// Run the interpreter with `args` in `cwd`, returning its exit code
    pub fn run(&self, args: &[String], cwd: &Utf8Path) -> Result<i32> {
        let mut cmd = self.command();
        cmd.args(args).current_dir(cwd);
        debug!("Running: {} {}", self.path, args.join(" "));
        let status = cmd
            .status()
            .map_err(|e| Error::process_execution(format!("{}: {}", self.path, e)))?;
        Ok(exit_code(status))
    }
}

/// Directory holding a venv's executables
pub fn venv_bin_dir(project_dir: &Utf8Path) -> Utf8PathBuf {
    let bin = if cfg!(windows) { "Scripts" } else { "bin" };
    project_dir.join(VENV_DIR).join(bin)
}

/// Platform file name for an executable
pub fn executable(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Exit code of a finished process; signals count as failure
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Installs and removes Python packages
pub trait PackageInstaller {
    /// Install a package by name or path
    fn install(&self, spec: &str) -> Result<()>;

    /// Install a project from disk in editable mode
    fn install_editable(&self, path: &Utf8Path) -> Result<()>;

    /// Upgrade an installed package
    fn upgrade(&self, spec: &str) -> Result<()>;

    /// Remove an installed package
    fn uninstall(&self, spec: &str) -> Result<()>;
}

/// Creates a project's virtual environment
pub trait EnvironmentCreator {
    fn create(&self, project_dir: &Utf8Path) -> Result<()>;
}

/// `python -m pip` driven through a given interpreter
#[derive(Debug, Clone)]
pub struct Pip {
    python: Interpreter,
}

impl Pip {
    pub fn new(python: Interpreter) -> Self {
        Self { python }
    }

    /// pip of a project's virtual environment
    pub fn for_project(project_dir: &Utf8Path) -> Self {
        Self::new(Interpreter::venv(project_dir))
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.python
    }

    fn pip(&self, args: &[&str]) -> Result<()> {
        let mut cmd = self.python.command();
        cmd.args(["-m", "pip"]).args(args);
        let display = format!("pip {}", args.join(" "));
        run_checked(cmd, display)
    }
}

impl PackageInstaller for Pip {
    fn install(&self, spec: &str) -> Result<()> {
        info!("Installing {}", spec);
        self.pip(&["install", spec])
    }

    fn install_editable(&self, path: &Utf8Path) -> Result<()> {
        info!("Installing {} in editable mode", path);
        self.pip(&[
            "install",
            "-e",
            path.as_str(),
            "--config-settings",
            "editable_mode=strict",
        ])
    }

    fn upgrade(&self, spec: &str) -> Result<()> {
        info!("Upgrading {}", spec);
        self.pip(&["install", "--upgrade", spec])
    }

    fn uninstall(&self, spec: &str) -> Result<()> {
        info!("Uninstalling {}", spec);
        self.pip(&["uninstall", "-y", spec])
    }
}

/// `python -m venv venv`
#[derive(Debug, Clone)]
pub struct Venv {
    python: Interpreter,
}

impl Venv {
    pub fn new(python: Interpreter) -> Self {
        Self { python }
    }
}

impl EnvironmentCreator for Venv {
    fn create(&self, project_dir: &Utf8Path) -> Result<()> {
        info!("Creating virtual environment in {}", project_dir.join(VENV_DIR));
        let mut cmd = self.python.command();
        cmd.args(["-m", "venv", VENV_DIR]).current_dir(project_dir);
        run_checked(cmd, format!("{} -m venv {}", self.python.path(), VENV_DIR))
    }
}

/// Run a command, mapping spawn failures and non-zero exits to errors
fn run_checked(mut cmd: Command, display: String) -> Result<()> {
    let shown = &display;
    debug!("Running: {}", shown);
    let status = cmd
        .status()
        .map_err(|e| Error::process_execution(format!("{}: {}", display, e)))?;

    if !status.success() {
        return Err(Error::installation_failed(display, status));
    }
    Ok(())
}
