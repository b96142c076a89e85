//! Utility functions shared across CLI commands

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Current working directory as a UTF-8 path
pub fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("Failed to read the current directory")?;
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}

/// Make `dir` the working directory, as `-C` asks
pub fn change_dir(dir: &Utf8Path) -> Result<()> {
    std::env::set_current_dir(dir).with_context(|| format!("Failed to change directory to {}", dir))
}

/// `1 dependency`, `2 dependencies`
pub fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}
