//! Lexical path normalization.
//!
//! Root directories and link targets come from flags, environment variables
//! and YAML files, so they may use `~`, be relative, or contain `.` and `..`.
//! Normalization turns them into absolute paths without touching the
//! filesystem or following symlinks.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expands a leading `~` to the home directory.
///
/// Only `~` and `~/path` are supported; `~user` is rejected.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory
/// cannot be determined, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use strap::paths::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/.dotfiles")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with(".dotfiles"));
///
/// assert_eq!(expand_tilde(Path::new("/opt/dots")).unwrap(), Path::new("/opt/dots"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolves `.` and `..` components lexically.
///
/// # Errors
///
/// Returns an error if `..` would climb above the filesystem root.
///
/// # Examples
///
/// ```
/// use strap::paths::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/dots/./workspaces/../run")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/dots/run"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = result.parent().is_none();
                if at_root || !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    Ok(result)
}

/// Normalizes `path`, resolving relative paths against `base`.
///
/// # Errors
///
/// Returns an error if tilde expansion or component resolution fails.
pub fn normalize_in(path: &Path, base: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    resolve_components(&absolute)
}

/// Normalizes `path`, resolving relative paths against the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined, or if
/// tilde expansion or component resolution fails.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Cannot get current directory: {e}"),
    })?;
    normalize_in(path, &cwd)
}
