//! Configuration system for strap.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and the root's `strap.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of file names and command templates
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (STRAP_*)
//! 3. Root config (`<root>/strap.yaml`)
//! 4. User config (`~/.strap/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use strap::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/dots"))
//!     .build()
//!     .unwrap();
//!
//! println!("Installing from {}", config.manifest_file);
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use strap::config::{Config, ConfigBuilder};
//! use strap::runner::CommandTemplate;
//!
//! let custom = Config {
//!     root: Some("/opt/dots".into()),
//!     linker: Some(CommandTemplate::new("ln-farm", ["{source}", "{package}"])),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.linker.program, "ln-farm");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, ResolvedConfig};
pub use validator::ConfigValidator;
