//! Environment variable handling for configuration overrides.
//!
//! This module provides support for STRAP_* environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use strap::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value, such as a
    /// boolean that is not one of true/false/1/0/yes/no/on/off.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(root) = env::var("STRAP_ROOT") {
            config.root = Some(PathBuf::from(root));
        }

        if let Ok(name) = env::var("STRAP_MANIFEST_FILE") {
            config.manifest_file = Some(name);
        }

        if let Ok(name) = env::var("STRAP_DEFAULTS_FILE") {
            config.defaults_file = Some(name);
        }

        if let Ok(name) = env::var("STRAP_SYMLINKS_DIR") {
            config.symlinks_dir = Some(name);
        }

        if let Ok(target) = env::var("STRAP_LINK_TARGET") {
            config.link_target = Some(PathBuf::from(target));
        }

        if let Ok(val) = env::var("STRAP_SKIP_PREFLIGHT") {
            config.skip_preflight = Some(Self::parse_bool("STRAP_SKIP_PREFLIGHT", &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
