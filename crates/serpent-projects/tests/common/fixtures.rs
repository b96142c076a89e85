//! On-disk fixtures

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use serpent_projects::descriptor::Descriptor;
use serpent_projects::manifest::Manifest;
use serpent_projects::project::Project;
use serpent_projects::types::DevFeature;
use std::fs;
use tempfile::TempDir;

/// An empty directory called `name` inside a fresh temp dir
pub fn empty_dir(name: &str) -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join(name)).unwrap();
    fs::create_dir(&root).unwrap();
    (temp, root)
}

/// A saved project of `template` in a fresh directory called `name`
pub fn saved_project(
    name: &str,
    template: &str,
    devfeature: Option<DevFeature>,
) -> (TempDir, Project) {
    let (temp, root) = empty_dir(name);
    let project = Project::new(
        &root,
        Descriptor::new(template, devfeature),
        Manifest::new(name),
    );
    project.save().unwrap();
    (temp, project)
}

/// A bare Python project with a manifest naming it `project_name`
pub fn python_project(dir: &Utf8Path, project_name: &str) {
    fs::create_dir_all(dir).unwrap();
    Manifest::new(project_name).save(dir).unwrap();
}

/// List every file under `root`, relative and sorted
pub fn files_under(root: &Utf8Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root.as_std_path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
