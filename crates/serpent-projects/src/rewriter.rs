//! Global-code injection
//!
//! Projects created with `--development-feature globalcode` keep shared code
//! in `generated/global_code.py`. Before every run the source tree is copied
//! to `generated/run`, with the shared fragment prepended to each `.py` file
//! and the editor-facing import of that fragment removed.
//!
//! The output tree is deleted and rebuilt from scratch on every call.

use crate::error::{Error, Result};
use crate::types::{GENERATED_DIR, GENERATED_RUN_DIR, GLOBAL_CODE_FILE, VENV_DIR};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Import line stripped from every rewritten file.
///
/// Matched as a literal substring; aliased, multi-line or differently spaced
/// imports are left as they are.
pub const GLOBAL_IMPORT: &str = "from generated.global_code import *";

/// Text of `generated/global_code.py` in a new project
pub const GLOBAL_CODE_PLACEHOLDER: &str = "# Add global code here";

/// Source file extension that receives the fragment
const SOURCE_EXTENSION: &str = "py";

/// Summary of one rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub directories: usize,
    pub files: usize,
}

/// Rebuilds `generated/run` for one project root
#[derive(Debug, Clone)]
pub struct GlobalCodeRewriter {
    root: Utf8PathBuf,
}

impl GlobalCodeRewriter {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn output_dir(&self) -> Utf8PathBuf {
        self.root.join(GENERATED_RUN_DIR)
    }

    /// Create `generated/run` and the placeholder fragment for a new project
    pub fn scaffold(&self) -> Result<()> {
        fs::create_dir_all(self.output_dir())?;
        fs::write(self.root.join(GLOBAL_CODE_FILE), GLOBAL_CODE_PLACEHOLDER)?;
        Ok(())
    }

    /// Delete and regenerate the output tree
    pub fn rebuild(&self) -> Result<RewriteReport> {
        let fragment_path = self.root.join(GLOBAL_CODE_FILE);
        let fragment = fs::read_to_string(&fragment_path).map_err(|e| {
            Error::config_malformed(GLOBAL_CODE_FILE, format!("cannot read {}: {}", fragment_path, e))
        })?;

        let out = self.output_dir();
        if out.exists() {
            fs::remove_dir_all(&out)?;
        }
        fs::create_dir_all(&out)?;

        let mut report = RewriteReport::default();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() != 1 || !is_skipped_top_level(e.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::Io(std::io::Error::other(format!("failed to walk directory: {}", e)))
            })?;
            if entry.depth() == 0 {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(self.root.as_std_path())
                .map_err(|_| Error::invalid_path(entry.path().display().to_string()))?;
            let rel = Utf8Path::from_path(rel)
                .ok_or_else(|| Error::invalid_path(rel.display().to_string()))?;
            let target = out.join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
                report.directories += 1;
                continue;
            }

            if !entry.file_type().is_file() || rel.extension() != Some(SOURCE_EXTENSION) {
                continue;
            }

            let source = fs::read_to_string(entry.path())?;
            fs::write(&target, inject(&fragment, &source))?;
            debug!("Rewrote {}", rel);
            report.files += 1;
        }

        info!(
            "Rebuilt {} ({} files, {} directories)",
            out, report.files, report.directories
        );
        Ok(report)
    }
}

/// Fragment, a newline, then the source with the global import removed
pub fn inject(fragment: &str, source: &str) -> String {
    format!("{}\n{}", fragment, source.replace(GLOBAL_IMPORT, ""))
}

fn is_skipped_top_level(name: &std::ffi::OsStr) -> bool {
    name == GENERATED_DIR || name == VENV_DIR
}
