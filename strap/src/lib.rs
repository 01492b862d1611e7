#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strap
//!
//! A library for bootstrapping machines from a tree of nested workspaces.
//!
//! A workspace root either is a single workspace or holds a `workspaces`
//! directory of named workspaces, which may nest further. A container's
//! `shared` workspace applies to every workspace beside it. Bootstrapping an
//! address such as `org.project` installs, then finalizes, every `shared`
//! workspace on the way down followed by the named workspace itself.
//!
//! ## Core Types
//!
//! - [`WorkspacePath`]: Parsed dotted workspace addresses
//! - [`StructureValidator`]: Checks an address against the directory tree
//! - [`Traversal`] and [`Action`]: Ordered visits of the directories to act on
//! - [`Bootstrap`]: Validation, preflight and both passes end to end
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use strap::{StructureValidator, Traversal, WorkspacePath};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir_all(dir.path().join("workspaces/shared")).unwrap();
//! std::fs::create_dir_all(dir.path().join("workspaces/org/workspaces/project")).unwrap();
//!
//! let address = WorkspacePath::parse("org.project").unwrap();
//! StructureValidator::new(dir.path()).validate(&address).unwrap();
//!
//! let steps = Traversal::new(dir.path()).plan(&address).unwrap();
//! assert!(steps[0].path.ends_with("workspaces/shared"));
//! assert!(steps[1].path.ends_with("org/workspaces/project"));
//! ```

pub mod actions;
pub mod address;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod runner;
pub mod traverse;
pub mod validate;
pub mod workspace;

// Re-export key types at crate root for convenience
pub use actions::{FinalizeAction, InstallAction, Pass};
pub use address::WorkspacePath;
pub use bootstrap::{Bootstrap, BootstrapPlan, BootstrapReport};
pub use config::{Config, ConfigBuilder, ResolvedConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use runner::{CommandRunner, CommandTemplate, Invocation, RecordingRunner, SystemRunner};
pub use traverse::{Action, Traversal};
pub use validate::StructureValidator;
pub use workspace::{Role, TraversalStep, WorkspaceTree};
