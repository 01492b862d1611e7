//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, address parsing and path display.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use strap::{Config, ConfigBuilder, ResolvedConfig, WorkspacePath};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the workspace root.
    pub root: Option<PathBuf>,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options and command flags (highest priority)
/// 2. Environment variables
/// 3. The root's `strap.yaml`
/// 4. The user config in the data directory
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(
    global: &GlobalOptions,
    overrides: Config,
) -> Result<ResolvedConfig, CliError> {
    let mut builder = ConfigBuilder::new().with_config(Config {
        root: global.root.clone(),
        ..overrides
    });
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Parse an optional address argument; a missing address is the root.
pub fn parse_address(raw: Option<&str>) -> Result<WorkspacePath, CliError> {
    WorkspacePath::parse(raw.unwrap_or_default()).map_err(CliError::from)
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
