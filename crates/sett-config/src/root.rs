//! The config root — a section tree bound to a backing file.
//!
//! Implements the lifecycle operations:
//!
//! 1. `save` — full snapshot write through the document store
//! 2. `load` — unconditional read, reconciled onto the declared fields
//! 3. `sync` — create-from-defaults if the file is absent, else
//!    load-overriding-defaults
//!
//! `pre_process`/`post_process` hooks run around the persistence boundary:
//! `pre_process` before a save externalizes values (absolute paths become
//! root-relative, for portability of the saved file across machines) and
//! `post_process` after a load — and after a save — internalizes them back.

use std::path::{Path, PathBuf};

use sett_store::{DocumentStore, StoreError};
use tracing::{debug, info};

use crate::error::ConfigResult;
use crate::paths::PathResolver;
use crate::section::{Section, UnknownFieldPolicy};
use crate::value::Value;

/// A callback run at the persistence boundary, with mutable access to the
/// root section and the resolver anchored at the root directory.
pub type Hook = Box<dyn FnMut(&mut Section, &PathResolver) -> ConfigResult<()> + Send>;

/// The top-level section, bound to a backing file and a root directory —
/// the unit of load/save/sync.
pub struct ConfigRoot {
    section: Section,
    config_file_path: PathBuf,
    resolver: PathResolver,
    store: Box<dyn DocumentStore + Send + Sync>,
    unknown_fields: UnknownFieldPolicy,
    pre_process: Option<Hook>,
    post_process: Option<Hook>,
}

impl ConfigRoot {
    /// Bind a section carrying its declared defaults to a backing file, a
    /// root directory for relative-path conversion, and a document store.
    ///
    /// Both paths are immutable after construction.
    pub fn new(
        section: Section,
        config_file_path: impl Into<PathBuf>,
        root_path: impl Into<PathBuf>,
        store: Box<dyn DocumentStore + Send + Sync>,
    ) -> Self {
        Self {
            section,
            config_file_path: config_file_path.into(),
            resolver: PathResolver::new(root_path),
            store,
            unknown_fields: UnknownFieldPolicy::default(),
            pre_process: None,
            post_process: None,
        }
    }

    /// Bind a section, selecting the store from the backing file's
    /// extension (`config.json`, `config.yaml`, `config.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnsupportedFormat`] for an unrecognized
    /// extension.
    pub fn for_path(
        section: Section,
        config_file_path: impl Into<PathBuf>,
        root_path: impl Into<PathBuf>,
    ) -> ConfigResult<Self> {
        let config_file_path = config_file_path.into();
        let store = sett_store::for_path(&config_file_path)?;
        Ok(Self::new(section, config_file_path, root_path, store))
    }

    /// Set the policy for on-disk fields with no declared counterpart.
    #[must_use]
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Register the hook run before every save (externalize).
    #[must_use]
    pub fn with_pre_process(
        mut self,
        hook: impl FnMut(&mut Section, &PathResolver) -> ConfigResult<()> + Send + 'static,
    ) -> Self {
        self.pre_process = Some(Box::new(hook));
        self
    }

    /// Register the hook run after every load and save (internalize).
    #[must_use]
    pub fn with_post_process(
        mut self,
        hook: impl FnMut(&mut Section, &PathResolver) -> ConfigResult<()> + Send + 'static,
    ) -> Self {
        self.post_process = Some(Box::new(hook));
        self
    }

    /// The root section.
    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Mutable access to the root section.
    pub fn section_mut(&mut self) -> &mut Section {
        &mut self.section
    }

    /// The resolver anchored at this root's directory.
    #[must_use]
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The backing file location.
    #[must_use]
    pub fn config_file_path(&self) -> &Path {
        &self.config_file_path
    }

    /// Current value of a root-section field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.section.get(name)
    }

    /// Overwrite a root-section field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`](crate::ConfigError::UnknownField)
    /// for an undeclared name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ConfigResult<()> {
        self.section.set(name, value)
    }

    /// Serialize the current object graph and write it through the store,
    /// creating or overwriting the backing file. A full snapshot write — no
    /// merge.
    ///
    /// Runs `pre_process` before serializing and `post_process` after the
    /// write, so a successful save leaves in-memory values in their
    /// internal form.
    ///
    /// # Errors
    ///
    /// Propagates hook failures, serialization failures, and store I/O
    /// errors.
    pub fn save(&mut self) -> ConfigResult<()> {
        self.pre_process()?;
        let document = self.section.to_document()?;
        self.store.write(&self.config_file_path, &document)?;
        debug!(path = %self.config_file_path.display(), "config saved");
        self.post_process()
    }

    /// Read the full document from the backing file and reconcile it onto
    /// the declared fields, then run `post_process`.
    ///
    /// An unconditional read, not a merge — every field present in the
    /// document overwrites its in-memory value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the backing file does not exist,
    /// [`StoreError::Malformed`] for unparseable content, and the
    /// reconciliation errors of [`Section::apply`].
    pub fn load(&mut self) -> ConfigResult<()> {
        let document = self.store.read(&self.config_file_path)?;
        self.section.apply(&document, self.unknown_fields)?;
        debug!(path = %self.config_file_path.display(), "config loaded");
        self.post_process()
    }

    /// Reconcile in-memory defaults with on-disk state.
    ///
    /// - Backing file absent, `auto_create` — save the current defaults and
    ///   return `true` ("file was created"). First run: in-code defaults
    ///   become durable truth.
    /// - Backing file absent, `!auto_create` — fail with the store's
    ///   not-found error; nothing is created.
    /// - Backing file present — load it and return `false`. Durable truth
    ///   overrides in-code defaults; fields declared since the file was
    ///   written keep their defaults, because `apply` only overwrites keys
    ///   actually present in the document.
    ///
    /// # Errors
    ///
    /// Propagates the underlying `save`/`load` failure.
    pub fn sync(&mut self, auto_create: bool) -> ConfigResult<bool> {
        if self.store.exists(&self.config_file_path) {
            self.load()?;
            return Ok(false);
        }
        if !auto_create {
            return Err(StoreError::NotFound {
                path: self.config_file_path.display().to_string(),
            }
            .into());
        }
        self.save()?;
        info!(path = %self.config_file_path.display(), "created config file from defaults");
        Ok(true)
    }

    /// Invoke the pre-save hook directly (a no-op when unset).
    ///
    /// # Errors
    ///
    /// Propagates the hook's failure.
    pub fn pre_process(&mut self) -> ConfigResult<()> {
        if let Some(mut hook) = self.pre_process.take() {
            let result = hook(&mut self.section, &self.resolver);
            self.pre_process = Some(hook);
            return result;
        }
        Ok(())
    }

    /// Invoke the post-load hook directly (a no-op when unset). Well-behaved
    /// hooks are idempotent; the built-in path conversions are.
    ///
    /// # Errors
    ///
    /// Propagates the hook's failure.
    pub fn post_process(&mut self) -> ConfigResult<()> {
        if let Some(mut hook) = self.post_process.take() {
            let result = hook(&mut self.section, &self.resolver);
            self.post_process = Some(hook);
            return result;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConfigRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRoot")
            .field("section", &self.section)
            .field("config_file_path", &self.config_file_path)
            .field("root_path", &self.resolver.root())
            .field("unknown_fields", &self.unknown_fields)
            .field("has_pre_process", &self.pre_process.is_some())
            .field("has_post_process", &self.post_process.is_some())
            .finish_non_exhaustive()
    }
}
