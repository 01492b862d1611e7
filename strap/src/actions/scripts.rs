//! Workspace hook scripts under `run/before` and `run/after`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory holding a workspace's hook scripts.
pub const RUN_DIR: &str = "run";

/// Scripts run before defaults and symlinks.
pub const BEFORE_DIR: &str = "before";

/// Scripts run after defaults and symlinks.
pub const AFTER_DIR: &str = "after";

/// Lists the executable regular files directly under `dir`, sorted by name.
///
/// A missing directory has no scripts. Non-executable files and dangling
/// symlinks are skipped with a warning and subdirectories are ignored.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be read, or
/// [`Error::InvalidPath`] naming an entry whose metadata cannot be read.
pub fn executable_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("skipping {}: broken symlink", path.display());
                continue;
            }
            Err(e) => {
                return Err(Error::InvalidPath {
                    path,
                    reason: e.to_string(),
                });
            }
        };
        if !metadata.is_file() {
            continue;
        }
        if is_executable(&metadata) {
            scripts.push(path);
        } else {
            log::warn!("skipping {}: not executable", path.display());
        }
    }

    scripts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(scripts)
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}
