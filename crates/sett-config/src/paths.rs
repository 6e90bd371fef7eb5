//! Relative/absolute path conversion against a configured root directory.
//!
//! Resolution is purely lexical — no filesystem access, no symlink
//! following. `.` components are dropped and `..` pops one level; popping
//! above the root is the escape condition. A path that reduces to an in-root
//! location through `..` segments (`sub/../sub/path`) is therefore
//! normalized first and then checked.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

/// Converts field paths between absolute and root-relative forms.
///
/// Bound to the root directory at construction; the root is immutable for
/// the resolver's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The anchor directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Express an absolute path inside the root as a root-relative path.
    ///
    /// A path that is not absolute, or an absolute path outside the root,
    /// is returned unchanged — the relative/absolute round-trip guarantee
    /// covers only absolute paths inside the root.
    #[must_use]
    pub fn make_relative_to_root(&self, absolute_path: &Path) -> PathBuf {
        if !absolute_path.is_absolute() {
            return absolute_path.to_path_buf();
        }
        match absolute_path.strip_prefix(&self.root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => {
                warn!(
                    path = %absolute_path.display(),
                    root = %self.root.display(),
                    "absolute path outside root left unchanged"
                );
                absolute_path.to_path_buf()
            },
        }
    }

    /// Resolve a root-relative path to an absolute path under the root.
    ///
    /// Applying this to an already-absolute path inside the root is a no-op,
    /// so repeated application is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PathEscapesRoot`] when `enforce_in_root` is
    /// set and resolution would leave the root — a `..` popping above the
    /// root, or an already-absolute input outside it.
    pub fn make_absolute_to_root(
        &self,
        relative_path: &Path,
        enforce_in_root: bool,
    ) -> ConfigResult<PathBuf> {
        if relative_path.is_absolute() {
            if enforce_in_root && !relative_path.starts_with(&self.root) {
                return Err(self.escape_error(relative_path));
            }
            return Ok(relative_path.to_path_buf());
        }

        let mut resolved = self.root.clone();
        for component in relative_path.components() {
            match component {
                // A relative path has no prefix or root component.
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {},
                Component::ParentDir => {
                    if enforce_in_root && resolved == self.root {
                        return Err(self.escape_error(relative_path));
                    }
                    resolved.pop();
                },
                Component::Normal(segment) => {
                    resolved.push(segment);
                },
            }
        }

        Ok(resolved)
    }

    fn escape_error(&self, path: &Path) -> ConfigError {
        ConfigError::PathEscapesRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        }
    }
}
