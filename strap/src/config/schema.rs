//! Configuration schema definitions.
//!
//! [`Config`] is the layered, all-optional form read from YAML files and
//! environment variables. [`ResolvedConfig`] is the fully defaulted form the
//! bootstrap engine consumes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paths;
use crate::runner::CommandTemplate;

/// Default package manifest file name.
pub const DEFAULT_MANIFEST_FILE: &str = "Brewfile";

/// Default declarative defaults file name.
pub const DEFAULT_DEFAULTS_FILE: &str = "defaults.yml";

/// Default symlink tree directory name.
pub const DEFAULT_SYMLINKS_DIR: &str = "symlinks";

/// Default directory symlinks are created in.
pub const DEFAULT_LINK_TARGET: &str = "~";

/// Placeholders available to the installer template.
pub const INSTALLER_PLACEHOLDERS: &[&str] = &["manifest", "dir"];

/// Placeholders available to the defaults applier template.
pub const DEFAULTS_APPLIER_PLACEHOLDERS: &[&str] = &["file", "dir"];

/// Placeholders available to the linker template.
pub const LINKER_PLACEHOLDERS: &[&str] = &["source", "package", "target", "dir"];

/// Placeholders available to preflight commands.
pub const PREFLIGHT_PLACEHOLDERS: &[&str] = &["root"];

/// Complete configuration structure.
///
/// Every field is optional so configurations from several sources can be
/// merged field by field.
///
/// # Examples
///
/// ```
/// use strap::config::Config;
///
/// let config: Config = serde_yaml::from_str("manifest_file: Packages\nskip_preflight: true\n").unwrap();
/// assert_eq!(config.manifest_file.as_deref(), Some("Packages"));
/// assert_eq!(config.skip_preflight, Some(true));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory of the workspace tree (not valid in `strap.yaml`).
    pub root: Option<PathBuf>,

    /// Package manifest file name looked up in each workspace.
    pub manifest_file: Option<String>,

    /// Declarative defaults file name looked up in each workspace.
    pub defaults_file: Option<String>,

    /// Symlink tree directory name looked up in each workspace.
    pub symlinks_dir: Option<String>,

    /// Directory the linker creates symlinks in.
    pub link_target: Option<PathBuf>,

    /// Package-bundle installer command.
    pub installer: Option<CommandTemplate>,

    /// Declarative defaults applier command.
    pub defaults_applier: Option<CommandTemplate>,

    /// Symlink farm manager command.
    pub linker: Option<CommandTemplate>,

    /// Commands run in order before the install pass.
    pub preflight: Option<Vec<CommandTemplate>>,

    /// Skip the preflight commands.
    pub skip_preflight: Option<bool>,
}

/// Configuration with every default applied and every path normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Root directory of the workspace tree.
    pub root: PathBuf,
    /// Package manifest file name.
    pub manifest_file: String,
    /// Declarative defaults file name.
    pub defaults_file: String,
    /// Symlink tree directory name.
    pub symlinks_dir: String,
    /// Directory the linker creates symlinks in.
    pub link_target: PathBuf,
    /// Package-bundle installer command.
    pub installer: CommandTemplate,
    /// Declarative defaults applier command.
    pub defaults_applier: CommandTemplate,
    /// Symlink farm manager command.
    pub linker: CommandTemplate,
    /// Commands run before the install pass.
    pub preflight: Vec<CommandTemplate>,
    /// Whether preflight commands are skipped.
    pub skip_preflight: bool,
}

impl ResolvedConfig {
    /// Applies defaults to `config`.
    ///
    /// A missing root falls back to `working_dir`; relative paths are
    /// resolved against `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or link target cannot be normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use strap::config::{Config, ResolvedConfig};
    /// use std::path::Path;
    ///
    /// let resolved = ResolvedConfig::resolve(Config::default(), Path::new("/home/me/dots")).unwrap();
    /// assert_eq!(resolved.root, Path::new("/home/me/dots"));
    /// assert_eq!(resolved.manifest_file, "Brewfile");
    /// assert_eq!(resolved.installer.program, "brew");
    /// ```
    pub fn resolve(config: Config, working_dir: &Path) -> Result<Self> {
        let root = match config.root {
            Some(ref root) => paths::normalize_in(root, working_dir)?,
            None => paths::normalize_in(working_dir, working_dir)?,
        };
        let link_target = paths::normalize_in(
            config
                .link_target
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_LINK_TARGET)),
            working_dir,
        )?;

        Ok(Self {
            root,
            manifest_file: config
                .manifest_file
                .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string()),
            defaults_file: config
                .defaults_file
                .unwrap_or_else(|| DEFAULT_DEFAULTS_FILE.to_string()),
            symlinks_dir: config
                .symlinks_dir
                .unwrap_or_else(|| DEFAULT_SYMLINKS_DIR.to_string()),
            link_target,
            installer: config.installer.unwrap_or_else(default_installer),
            defaults_applier: config
                .defaults_applier
                .unwrap_or_else(default_defaults_applier),
            linker: config.linker.unwrap_or_else(default_linker),
            preflight: config.preflight.unwrap_or_default(),
            skip_preflight: config.skip_preflight.unwrap_or(false),
        })
    }
}

/// `brew bundle --no-lock --file {manifest}`
#[must_use]
pub fn default_installer() -> CommandTemplate {
    CommandTemplate::new("brew", ["bundle", "--no-lock", "--file", "{manifest}"])
}

/// `macos-defaults apply {file}`
#[must_use]
pub fn default_defaults_applier() -> CommandTemplate {
    CommandTemplate::new("macos-defaults", ["apply", "{file}"])
}

/// `stow --restow --dir {source} --target {target} {package}`
#[must_use]
pub fn default_linker() -> CommandTemplate {
    CommandTemplate::new(
        "stow",
        [
            "--restow",
            "--dir",
            "{source}",
            "--target",
            "{target}",
            "{package}",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
root: ~/dots
manifest_file: Brewfile
defaults_file: macos.yml
symlinks_dir: links
link_target: /tmp/home
installer:
  program: brew
  args: [bundle, --file, '{manifest}']
preflight:
  - program: ping
    args: [-c, '1', example.com]
skip_preflight: false
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("~/dots")));
        assert_eq!(config.defaults_file.as_deref(), Some("macos.yml"));
        assert_eq!(config.preflight.as_ref().map(Vec::len), Some(1));
        assert_eq!(config.installer.unwrap().args.len(), 3);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("nonsense: 1\n");
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_defaults() {
        let resolved = ResolvedConfig::resolve(Config::default(), Path::new("/work")).unwrap();
        assert_eq!(resolved.root, PathBuf::from("/work"));
        assert_eq!(resolved.defaults_file, DEFAULT_DEFAULTS_FILE);
        assert_eq!(resolved.symlinks_dir, DEFAULT_SYMLINKS_DIR);
        assert_eq!(resolved.link_target, home::home_dir().unwrap());
        assert_eq!(resolved.linker, default_linker());
        assert!(resolved.preflight.is_empty());
        assert!(!resolved.skip_preflight);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_relative_root() {
        let config = Config {
            root: Some(PathBuf::from("../dots")),
            ..Default::default()
        };
        let resolved = ResolvedConfig::resolve(config, Path::new("/home/me/src")).unwrap();
        assert_eq!(resolved.root, PathBuf::from("/home/me/dots"));
    }
}
