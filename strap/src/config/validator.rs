//! Configuration validation.
//!
//! This module checks that file names are plain names, that commands name a
//! program, and that command templates only use the placeholders their
//! action provides.

use std::path::{Component, Path};

use crate::config::schema::{
    Config, DEFAULTS_APPLIER_PLACEHOLDERS, INSTALLER_PLACEHOLDERS, LINKER_PLACEHOLDERS,
    PREFLIGHT_PLACEHOLDERS,
};
use crate::error::{Error, Result};
use crate::runner::CommandTemplate;

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use strap::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config, false).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration to validate
    /// * `is_root_file` - Whether this is a workspace root's `strap.yaml`,
    ///   which cannot relocate the root it lives in
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first invalid field.
    pub fn validate(config: &Config, is_root_file: bool) -> Result<()> {
        if is_root_file && config.root.is_some() {
            return Err(Error::Validation {
                field: "root".into(),
                message: "root is not valid in strap.yaml files".into(),
            });
        }

        if let Some(ref name) = config.manifest_file {
            Self::validate_file_name("manifest_file", name)?;
        }
        if let Some(ref name) = config.defaults_file {
            Self::validate_file_name("defaults_file", name)?;
        }
        if let Some(ref name) = config.symlinks_dir {
            Self::validate_file_name("symlinks_dir", name)?;
        }

        if let Some(ref installer) = config.installer {
            Self::validate_template("installer", installer, INSTALLER_PLACEHOLDERS)?;
        }
        if let Some(ref applier) = config.defaults_applier {
            Self::validate_template("defaults_applier", applier, DEFAULTS_APPLIER_PLACEHOLDERS)?;
        }
        if let Some(ref linker) = config.linker {
            Self::validate_template("linker", linker, LINKER_PLACEHOLDERS)?;
        }
        if let Some(ref preflight) = config.preflight {
            for command in preflight {
                Self::validate_template("preflight", command, PREFLIGHT_PLACEHOLDERS)?;
            }
        }

        Ok(())
    }

    /// A file name must be exactly one normal path component.
    fn validate_file_name(field: &str, value: &str) -> Result<()> {
        let mut components = Path::new(value).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if value.trim().is_empty() || !single_normal || value.contains('/') {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("'{value}' must be a plain file name"),
            });
        }
        Ok(())
    }

    fn validate_template(field: &str, template: &CommandTemplate, allowed: &[&str]) -> Result<()> {
        if template.program.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "program cannot be empty".into(),
            });
        }

        for name in template.placeholders() {
            if !allowed.contains(&name.as_str()) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!(
                        "unknown placeholder {{{name}}} (available: {})",
                        allowed.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
