//! Builder assembling a [`ResolvedConfig`] from every configuration layer.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, ResolvedConfig};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::paths;

/// Builds the effective configuration.
///
/// The root is decided first, from overrides, then `STRAP_ROOT`, then the
/// user config, then the working directory, because the root's own
/// `strap.yaml` can only be found once the root is known.
///
/// # Examples
///
/// ```
/// use strap::config::{Config, ConfigBuilder};
///
/// let overrides = Config {
///     root: Some("/opt/dots".into()),
///     manifest_file: Some("Pkgfile".to_string()),
///     ..Default::default()
/// };
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(overrides)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.manifest_file, "Pkgfile");
/// assert_eq!(config.defaults_file, "defaults.yml");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user config from `data_dir` instead of `~/.strap`.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = Some(data_dir.to_path_buf());
        self
    }

    /// Resolves relative paths, and a missing root, against `dir`.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Applies `config` above every other layer.
    ///
    /// Calling this twice merges the second override over the first.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        match self.overrides {
            Some(ref mut existing) => ConfigMerger::merge_into(existing, &config),
            None => self.overrides = Some(config),
        }
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `STRAP_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads, merges, validates and resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, an
    /// environment variable is invalid, validation fails, or a path cannot
    /// be normalized.
    pub fn build(self) -> Result<ResolvedConfig> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => env::current_dir()?,
        };

        let user = if self.skip_files {
            None
        } else {
            ConfigLoader::load_user_config(self.data_dir.as_deref())?
        };
        if let Some(ref source) = user {
            ConfigValidator::validate(&source.config, source.is_root_file())?;
        }

        let mut from_env = Config::default();
        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut from_env)?;
        }

        let root_hint = self
            .overrides
            .as_ref()
            .and_then(|c| c.root.clone())
            .or_else(|| from_env.root.clone())
            .or_else(|| user.as_ref().and_then(|s| s.config.root.clone()))
            .unwrap_or_else(|| working_dir.clone());
        let root = paths::normalize_in(&root_hint, &working_dir)?;

        let root_file = if self.skip_files {
            None
        } else {
            ConfigLoader::load_root_config(&root)?
        };
        if let Some(ref source) = root_file {
            ConfigValidator::validate(&source.config, true)?;
        }

        let mut merged = ConfigMerger::merge(user.into_iter().chain(root_file).collect());
        ConfigMerger::merge_into(&mut merged, &from_env);
        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut merged, overrides);
        }
        ConfigValidator::validate(&merged, false)?;

        merged.root = Some(root);
        let resolved = ResolvedConfig::resolve(merged, &working_dir)?;
        log::debug!("configuration resolved with root {}", resolved.root.display());
        Ok(resolved)
    }
}
