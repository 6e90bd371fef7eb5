#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Declarative, file-backed configuration objects.
//!
//! Applications declare a tree of defaulted fields — scalars, sequences,
//! mappings, filesystem paths, nested [`Section`]s — bind it to a backing
//! file and a root directory, and call [`ConfigRoot::sync`] to reconcile
//! in-memory defaults with on-disk state:
//!
//! - first run: the file is missing, so the declared defaults are written
//!   out and become durable truth;
//! - later runs: the file is loaded and overrides the defaults, so operator
//!   hand-edits survive — while fields declared since the file was written
//!   keep their in-code defaults, because reconciliation only overwrites
//!   keys actually present in the document.
//!
//! Persistence goes through a pluggable [`DocumentStore`]; JSON and YAML
//! backends ship in `sett-store`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use sett_config::{ConfigRoot, Section, Value};
//!
//! let mut server = Section::new("server");
//! server.declare("host", "127.0.0.1").declare("port", 8080);
//!
//! let mut section = Section::new("config");
//! section
//!     .declare("data_dir", PathBuf::from("data"))
//!     .declare("api_token", Value::Null)
//!     .declare_section(server);
//!
//! // Store picked from the extension; root dir anchors relative paths.
//! let mut conf = ConfigRoot::for_path(section, "/srv/app/config.yaml", "/srv/app").unwrap();
//! let created = conf.sync(true).unwrap();
//! println!("created fresh config: {created}");
//! println!("port: {:?}", conf.section().section("server").unwrap().get("port"));
//! ```

/// Configuration engine error types.
pub mod error;
/// Relative/absolute path conversion against the root directory.
pub mod paths;
/// The config root and its lifecycle operations.
pub mod root;
/// Config sections: declaration, serialization, reconciliation.
pub mod section;
/// The tagged value model.
pub mod value;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult};
pub use paths::PathResolver;
pub use root::{ConfigRoot, Hook};
pub use section::{Section, UnknownFieldPolicy};
pub use value::{FieldMap, Value};

// The persistence collaborators, re-exported for convenience.
pub use sett_store::{Document, DocumentStore, JsonStore, StoreError, YamlStore};
