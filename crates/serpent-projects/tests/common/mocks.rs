//! Mock toolchain implementations
//!
//! Record every call so tests can assert on what would have been run.

#![allow(dead_code)]

use camino::Utf8Path;
use serpent_projects::toolchain::{EnvironmentCreator, PackageInstaller};
use serpent_projects::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::sync::Mutex;

/// Package installer that records calls and fails on chosen names
#[derive(Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `spec` fail as a non-zero pip exit would
    pub fn failing_on(mut self, spec: &str) -> Self {
        self.failing.insert(spec.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, spec: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.contains(spec) {
            return Err(Error::installation_failed(
                format!("pip {}", call),
                "exit status: 1",
            ));
        }
        Ok(())
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, spec: &str) -> Result<()> {
        self.record(format!("install {}", spec), spec)
    }

    fn install_editable(&self, path: &Utf8Path) -> Result<()> {
        self.record(format!("install -e {}", path), path.as_str())
    }

    fn upgrade(&self, spec: &str) -> Result<()> {
        self.record(format!("install --upgrade {}", spec), spec)
    }

    fn uninstall(&self, spec: &str) -> Result<()> {
        self.record(format!("uninstall -y {}", spec), spec)
    }
}

/// Environment creator that makes an empty `venv` directory
#[derive(Default)]
pub struct MockEnvironment {
    created: Mutex<Vec<String>>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

impl EnvironmentCreator for MockEnvironment {
    fn create(&self, project_dir: &Utf8Path) -> Result<()> {
        fs::create_dir_all(project_dir.join("venv/bin"))?;
        self.created.lock().unwrap().push(project_dir.to_string());
        Ok(())
    }
}
