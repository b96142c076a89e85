//! Tool-level configuration resolved from the environment
//!
//! - `SERPENT_HOME`: directory holding the template registry
//!   (default `~/.serpent`)
//! - `SERPENT_PYTHON`: interpreter used for template installs and module
//!   template hooks (default: `python3`, then `python`, from `PATH`)

use crate::error::{Error, Result};
use crate::registry::REGISTRY_FILE;
use crate::toolchain::Interpreter;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable overriding the tool home
pub const HOME_ENV: &str = "SERPENT_HOME";

/// Environment variable overriding the tool interpreter
pub const PYTHON_ENV: &str = "SERPENT_PYTHON";

/// Interpreter names searched on `PATH`, in order
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Resolved tool configuration
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Directory holding `templates.lst`
    pub home: Utf8PathBuf,

    /// Explicit interpreter; `None` means search `PATH`
    pub python: Option<Utf8PathBuf>,
}

impl ToolConfig {
    /// Resolve configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let home = match std::env::var_os(HOME_ENV) {
            Some(dir) => utf8(PathBuf::from(dir))?,
            None => utf8(home_dir()?)?.join(".serpent"),
        };

        let python = std::env::var_os(PYTHON_ENV)
            .map(|p| utf8(PathBuf::from(p)))
            .transpose()?;

        debug!("Tool home: {}", home);
        Ok(Self { home, python })
    }

    /// Configuration rooted at an explicit home directory
    pub fn with_home(home: impl Into<Utf8PathBuf>) -> Self {
        Self {
            home: home.into(),
            python: None,
        }
    }

    /// Location of the installed-template registry
    pub fn registry_path(&self) -> Utf8PathBuf {
        self.home.join(REGISTRY_FILE)
    }

    /// The interpreter serpent itself uses (not a project's venv)
    pub fn interpreter(&self) -> Result<Interpreter> {
        if let Some(path) = &self.python {
            return Ok(Interpreter::new(path.clone()));
        }

        for candidate in INTERPRETER_CANDIDATES {
            if let Ok(found) = which::which(candidate) {
                debug!("Using interpreter {}", found.display());
                return Ok(Interpreter::new(utf8(found)?));
            }
        }

        Err(Error::InterpreterNotFound {
            tried: INTERPRETER_CANDIDATES.join(", "),
        })
    }
}

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// overrides in containers and test harnesses are respected.
fn home_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or(Error::HomeNotFound)
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| Error::invalid_path(p.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_home_override() {
        std::env::set_var(HOME_ENV, "/opt/serpent");
        let config = ToolConfig::from_env().unwrap();
        std::env::remove_var(HOME_ENV);

        assert_eq!(config.home, Utf8PathBuf::from("/opt/serpent"));
        assert_eq!(
            config.registry_path(),
            Utf8PathBuf::from("/opt/serpent/templates.lst")
        );
    }

    #[test]
    #[serial]
    fn test_default_home_under_user_home() {
        let original = std::env::var_os("HOME");
        std::env::remove_var(HOME_ENV);
        std::env::set_var("HOME", "/home/tester");

        let config = ToolConfig::from_env().unwrap();

        match original {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
        assert_eq!(config.home, Utf8PathBuf::from("/home/tester/.serpent"));
    }

    #[test]
    #[serial]
    fn test_python_override_wins() {
        std::env::set_var(PYTHON_ENV, "/usr/local/bin/python3.12");
        let config = ToolConfig::from_env().unwrap();
        std::env::remove_var(PYTHON_ENV);

        let interpreter = config.interpreter().unwrap();
        assert_eq!(interpreter.path(), "/usr/local/bin/python3.12");
    }
}
