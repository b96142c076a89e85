//! Dependency manager integration tests
//!
//! Installer calls are recorded by a mock; manifest and descriptor state is
//! checked after a save/load round trip.

mod common;

use common::*;
use serpent_projects::deps::{self, Added, Removed, Upgraded};
use serpent_projects::project::Project;
use serpent_projects::Error;

#[test]
fn test_add_packages_updates_manifest() {
    let (_temp, mut project) = saved_project("app", "console", None);
    let installer = RecordingInstaller::new();

    let added = deps::add(&mut project, &installer, &["requests", "flask"]).unwrap();
    project.save().unwrap();

    assert_eq!(
        added[0],
        Added::Package {
            name: "requests".to_string(),
            newly_listed: true
        }
    );
    assert_eq!(installer.calls(), vec!["install requests", "install flask"]);

    let reloaded = Project::load(project.root()).unwrap();
    assert_eq!(
        reloaded.manifest.dependencies().unwrap(),
        vec!["requests", "flask"]
    );
}

#[test]
fn test_add_twice_lists_once() {
    let (_temp, mut project) = saved_project("app", "console", None);
    let installer = RecordingInstaller::new();

    deps::add(&mut project, &installer, &["requests"]).unwrap();
    let again = deps::add(&mut project, &installer, &["requests"]).unwrap();

    assert_eq!(
        again,
        vec![Added::Package {
            name: "requests".to_string(),
            newly_listed: false
        }]
    );
    assert_eq!(project.manifest.dependencies().unwrap(), vec!["requests"]);
}

#[test]
fn test_disk_dependency_recorded_by_project_name() {
    let (temp, mut project) = saved_project("app", "console", None);
    let shared = camino::Utf8PathBuf::from_path_buf(temp.path().join("shared")).unwrap();
    python_project(&shared, "shared-utils");
    let installer = RecordingInstaller::new();

    let added = deps::add(&mut project, &installer, &["../shared"]).unwrap();
    project.save().unwrap();

    match &added[0] {
        Added::Disk { project: name, .. } => assert_eq!(name, "shared-utils"),
        other => panic!("Expected disk dependency, got: {:?}", other),
    }
    assert_eq!(installer.calls().len(), 1);
    assert!(installer.calls()[0].starts_with("install -e "));

    let reloaded = Project::load(project.root()).unwrap();
    assert_eq!(reloaded.descriptor.diskdeps, vec!["shared-utils"]);
    assert!(reloaded.manifest.dependencies().unwrap().is_empty());
}

#[test]
fn test_partial_batch_keeps_earlier_successes() {
    let (_temp, mut project) = saved_project("app", "console", None);
    let installer = RecordingInstaller::new().failing_on("broken");

    let result = deps::add(&mut project, &installer, &["requests", "broken", "flask"]);
    project.save().unwrap();

    assert!(matches!(result, Err(Error::InstallationFailed { .. })));
    assert_eq!(installer.calls(), vec!["install requests", "install broken"]);

    let reloaded = Project::load(project.root()).unwrap();
    assert_eq!(reloaded.manifest.dependencies().unwrap(), vec!["requests"]);
}

#[test]
fn test_remove_from_either_list() {
    let (_temp, mut project) = saved_project("app", "console", None);
    project.manifest.add_dependency("requests").unwrap();
    project.descriptor.add_diskdep("shared-utils");
    let installer = RecordingInstaller::new();

    assert_eq!(
        deps::remove_one(&mut project, &installer, "requests").unwrap(),
        Removed::Manifest
    );
    assert_eq!(
        deps::remove_one(&mut project, &installer, "shared-utils").unwrap(),
        Removed::DiskDependency
    );
    assert_eq!(
        deps::remove_one(&mut project, &installer, "numpy").unwrap(),
        Removed::Unlisted
    );

    assert_eq!(
        installer.calls(),
        vec![
            "uninstall -y requests",
            "uninstall -y shared-utils",
            "uninstall -y numpy"
        ]
    );
    assert!(project.manifest.dependencies().unwrap().is_empty());
    assert!(project.descriptor.diskdeps.is_empty());
}

#[test]
fn test_failed_uninstall_keeps_listing() {
    let (_temp, mut project) = saved_project("app", "console", None);
    project.manifest.add_dependency("requests").unwrap();
    let installer = RecordingInstaller::new().failing_on("requests");

    assert!(deps::remove_one(&mut project, &installer, "requests").is_err());
    assert_eq!(project.manifest.dependencies().unwrap(), vec!["requests"]);
}

#[test]
fn test_upgrade_all_and_skip_local() {
    let (temp, mut project) = saved_project("app", "console", None);
    project.manifest.add_dependency("requests").unwrap();
    project.manifest.add_dependency("flask").unwrap();
    python_project(
        &camino::Utf8PathBuf::from_path_buf(temp.path().join("shared")).unwrap(),
        "shared",
    );
    let installer = RecordingInstaller::new();

    let targets = deps::upgrade_targets(&project, &[]).unwrap();
    assert_eq!(targets, vec!["requests", "flask"]);
    for name in &targets {
        deps::upgrade_one(&project, &installer, name).unwrap();
    }
    assert_eq!(
        installer.calls(),
        vec!["install --upgrade requests", "install --upgrade flask"]
    );

    let skipped = deps::upgrade_one(&project, &installer, "../shared").unwrap();
    assert_eq!(skipped, Upgraded::SkippedLocal("../shared".to_string()));
    assert_eq!(installer.calls().len(), 2);
}

#[test]
fn test_list_both_groups() {
    let (_temp, mut project) = saved_project("app", "console", None);
    project.manifest.add_dependency("requests").unwrap();
    project.descriptor.add_diskdep("shared-utils");

    let listing = deps::list(&project).unwrap();
    assert_eq!(
        listing.to_string(),
        "Libraries:\n  requests\nProject References:\n  shared-utils\n"
    );
}
