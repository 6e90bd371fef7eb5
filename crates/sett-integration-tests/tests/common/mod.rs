//! Shared test harness for integration tests.

use std::path::PathBuf;

use sett_config::{ConfigRoot, Section, Value};
use tempfile::TempDir;

/// Backing-file names exercised by every lifecycle scenario — one per
/// shipped store backend.
#[allow(dead_code)]
pub const FORMATS: [&str; 2] = ["config.json", "config.yaml"];

/// A self-contained harness owning a temp directory that acts as both the
/// data dir (config file location) and the root dir (relative-path anchor).
///
/// The tempdir is cleaned up when the harness is dropped.
pub struct ConfigHarness {
    file_name: &'static str,
    dir: TempDir,
}

#[allow(dead_code)]
impl ConfigHarness {
    /// Build a harness for the given backing-file name.
    pub fn new(file_name: &'static str) -> Self {
        Self {
            file_name,
            dir: TempDir::new().expect("failed to create tempdir"),
        }
    }

    /// Location of the backing file inside the data dir.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(self.file_name)
    }

    /// The data/root directory.
    pub fn root_path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// The declared defaults shared by the lifecycle scenarios: scalars, a
    /// null sentinel, a list, a mixed-type mapping, and a nested section.
    pub fn defaults() -> Section {
        let mut sub = Section::new("sub");
        sub.declare("section_var", "section").declare("section_int", 20);

        let mut section = Section::new("config");
        section
            .declare("my_var", "test")
            .declare("my_int", 50)
            .declare("my_none", Value::Null)
            .declare("my_list", vec![1, 2])
            .declare(
                "my_dict",
                Value::from_iter([("first", Value::from("derp")), ("2", Value::from(2.5))]),
            )
            .declare_section(sub);
        section
    }

    /// A fresh root over the harness paths, carrying the shared defaults,
    /// with the store picked from the file extension.
    pub fn fresh_root(&self) -> ConfigRoot {
        ConfigRoot::for_path(Self::defaults(), self.config_path(), self.root_path())
            .expect("extension maps to a shipped store")
    }

    /// A fresh root carrying custom defaults.
    pub fn root_with(&self, section: Section) -> ConfigRoot {
        ConfigRoot::for_path(section, self.config_path(), self.root_path())
            .expect("extension maps to a shipped store")
    }
}
