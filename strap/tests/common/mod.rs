//! Common test utilities for integration tests.
//!
//! This module provides a builder for workspace trees on disk and an action
//! that records what a traversal visits.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use strap::config::{Config, ResolvedConfig};
use strap::{Action, Error, RecordingRunner, Result, TraversalStep};

/// Builder for workspace trees in a temporary directory.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let tree = TreeFixture::new()
///     .dir("workspaces/shared")
///     .file("workspaces/shared/Brewfile", "brew \"git\"\n")
///     .build();
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    dirs: Vec<String>,
    files: Vec<(String, String)>,
    scripts: Vec<String>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dirs: Vec::new(),
            files: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// The nested `org.project` layout with a shared workspace at the top.
    pub fn org_project() -> Self {
        Self::new()
            .file("workspaces/shared/Brewfile", "brew \"git\"\n")
            .dir("workspaces/shared/symlinks/git")
            .file("workspaces/org/workspaces/project/Brewfile", "brew \"jq\"\n")
            .file("workspaces/org/workspaces/project/defaults.yml", "{}\n")
    }

    /// Adds a directory.
    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    /// Adds a file, creating its parents.
    pub fn file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((path.to_string(), contents.to_string()));
        self
    }

    /// Adds an executable shell script that exits zero.
    pub fn script(mut self, path: &str) -> Self {
        self.scripts.push(path.to_string());
        self
    }

    /// Writes the tree to a new temporary directory.
    pub fn build(self) -> TempDir {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        for (path, contents) in &self.files {
            write_file(&root.join(path), contents);
        }
        for path in &self.scripts {
            let full = root.join(path);
            write_file(&full, "#!/bin/sh\nexit 0\n");
            make_executable(&full);
        }

        temp
    }
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Resolved configuration for `root` that links into `root/home`.
#[allow(dead_code)]
pub fn test_config(root: &Path) -> ResolvedConfig {
    let overrides = Config {
        link_target: Some(root.join("home")),
        ..Default::default()
    };
    ResolvedConfig::resolve(overrides, root).unwrap()
}

/// Programs recorded by `runner`, in order.
#[allow(dead_code)]
pub fn programs(runner: &RecordingRunner) -> Vec<String> {
    runner
        .invocations()
        .iter()
        .map(|inv| inv.program.clone())
        .collect()
}

/// An action that records visited steps and can fail at one directory.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingAction {
    /// Steps acted on, in order.
    pub visited: Vec<TraversalStep>,
    fail_at: Option<PathBuf>,
}

#[allow(dead_code)]
impl RecordingAction {
    /// Creates an action that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the action fail when it reaches `path`.
    pub fn failing_at(path: impl Into<PathBuf>) -> Self {
        Self {
            visited: Vec::new(),
            fail_at: Some(path.into()),
        }
    }

    /// Visited paths relative to `root`, as strings.
    pub fn relative_paths(&self, root: &Path) -> Vec<String> {
        self.visited
            .iter()
            .map(|step| {
                step.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

impl Action for RecordingAction {
    fn name(&self) -> &str {
        "record"
    }

    fn act(&mut self, step: &TraversalStep) -> Result<()> {
        if self.fail_at.as_deref() == Some(step.path.as_path()) {
            return Err(Error::CommandFailed {
                command: "record".to_string(),
                code: Some(1),
            });
        }
        self.visited.push(step.clone());
        Ok(())
    }
}
