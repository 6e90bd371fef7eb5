//! End-to-end path relativization: a `Path` field declared relative,
//! externalized to root-relative form on save and internalized back to an
//! absolute path on load, idempotently.

mod common;

use std::path::PathBuf;

use common::ConfigHarness;
use sett_config::{ConfigRoot, Section, Value};
use sett_store::DocumentStore;

/// A root whose `my_path` field is relativized before save and absolutized
/// after load, the way an application wires the hooks.
fn path_root(harness: &ConfigHarness) -> ConfigRoot {
    let mut section = Section::new("config");
    section.declare("my_path", PathBuf::from("sub/path"));

    harness
        .root_with(section)
        .with_pre_process(|section, resolver| {
            if let Some(path) = section.get("my_path").and_then(Value::as_path) {
                let relative = resolver.make_relative_to_root(path);
                section.set("my_path", relative)?;
            }
            Ok(())
        })
        .with_post_process(|section, resolver| {
            if let Some(path) = section.get("my_path").and_then(Value::as_path) {
                let absolute = resolver.make_absolute_to_root(path, true)?;
                section.set("my_path", absolute)?;
            }
            Ok(())
        })
}

#[test]
fn test_path_conversion_scenario() {
    let harness = ConfigHarness::new("config.json");
    let mut conf = path_root(&harness);

    conf.sync(true).unwrap();
    let start = conf.get("my_path").cloned().unwrap();

    conf.pre_process().unwrap();
    let mid = conf.get("my_path").cloned().unwrap();

    conf.post_process().unwrap();
    let mid2 = conf.get("my_path").cloned().unwrap();

    conf.post_process().unwrap();
    let end = conf.get("my_path").cloned().unwrap();

    // Sync leaves the field in internal (absolute) form.
    assert_eq!(start, Value::Path(harness.root_path().join("sub/path")));
    // Externalized form is root-relative.
    assert_eq!(mid, Value::Path(PathBuf::from("sub/path")));
    assert_ne!(start, mid);
    assert_ne!(mid, end);
    assert_eq!(start, end);
    // A second post_process is a no-op.
    assert_eq!(mid2, end);
}

#[test]
fn test_saved_file_holds_relative_path() {
    let harness = ConfigHarness::new("config.json");
    let mut conf = path_root(&harness);

    conf.sync(true).unwrap();

    let store = sett_store::for_path(&harness.config_path()).unwrap();
    let on_disk = store.read(&harness.config_path()).unwrap();
    assert_eq!(on_disk["my_path"], serde_json::Value::from("sub/path"));
}

#[test]
fn test_reload_restores_absolute_path() {
    let harness = ConfigHarness::new("config.json");
    path_root(&harness).sync(true).unwrap();

    let mut second = path_root(&harness);
    let created = second.sync(true).unwrap();

    assert!(!created);
    assert_eq!(
        second.get("my_path"),
        Some(&Value::Path(harness.root_path().join("sub/path")))
    );
}

#[test]
fn test_escaping_path_in_document_fails_post_process() {
    let harness = ConfigHarness::new("config.json");
    path_root(&harness).sync(true).unwrap();

    // An operator hand-edit pointing above the root.
    let store = sett_store::for_path(&harness.config_path()).unwrap();
    let mut on_disk = store.read(&harness.config_path()).unwrap();
    on_disk.insert(
        "my_path".to_owned(),
        serde_json::Value::from("../../etc/passwd"),
    );
    store.write(&harness.config_path(), &on_disk).unwrap();

    let mut conf = path_root(&harness);
    let result = conf.load();
    assert!(matches!(
        result,
        Err(sett_config::ConfigError::PathEscapesRoot { .. })
    ));
}
