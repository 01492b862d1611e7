//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Fake external tools that log their invocations
//! - Command builder helpers with isolated configuration

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak configuration into a test.
const STRAP_VARS: &[&str] = &[
    "STRAP_ROOT",
    "STRAP_DATA_DIR",
    "STRAP_MANIFEST_FILE",
    "STRAP_DEFAULTS_FILE",
    "STRAP_SYMLINKS_DIR",
    "STRAP_LINK_TARGET",
    "STRAP_SKIP_PREFLIGHT",
    "STRAP_LOG_MODE",
];

/// Test environment with an isolated workspace root and data directory.
///
/// The user config in the data directory points the installer, defaults
/// applier and linker at shell scripts that append their name and
/// arguments to `calls.log`.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Root of the workspace tree
    pub root: PathBuf,
    /// Data directory holding `config.yaml`
    pub data_dir: PathBuf,
    /// Log written by the fake tools
    pub log: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty root.
    pub fn new() -> Self {
        Self::with_preflight(&[])
    }

    /// Create a test environment whose preflight runs the given fake tools.
    pub fn with_preflight(preflight: &[&str]) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let root = base.join("root");
        let data_dir = base.join("data");
        let tools = base.join("tools");
        let log = base.join("calls.log");
        for dir in [&root, &data_dir, &tools] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        let installer = fake_tool(&tools, "install", &log, 0);
        let applier = fake_tool(&tools, "defaults", &log, 0);
        let linker = fake_tool(&tools, "link", &log, 0);
        let mut config = format!(
            "link_target: {}\n\
             installer:\n  program: {installer}\n  args: ['{{dir}}']\n\
             defaults_applier:\n  program: {applier}\n  args: ['{{file}}']\n\
             linker:\n  program: {linker}\n  args: ['{{package}}']\n",
            base.join("home").display()
        );
        if !preflight.is_empty() {
            config.push_str("preflight:\n");
            for name in preflight {
                let code = if name.starts_with("fail") { 1 } else { 0 };
                let tool = fake_tool(&tools, name, &log, code);
                config.push_str(&format!("  - program: {tool}\n"));
            }
        }
        fs::write(data_dir.join("config.yaml"), config).expect("Failed to write config");

        Self {
            temp_dir,
            root,
            data_dir,
            log,
        }
    }

    /// Get a bare command builder with STRAP_* variables cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("strap").expect("Failed to find strap binary");
        for var in STRAP_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the root and data directory configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--root")
            .arg(&self.root)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }

    /// Create a directory under the root.
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file under the root, with its parents.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create test directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create the `org.project` layout with a shared workspace at the top.
    pub fn org_project(&self) {
        self.file("workspaces/shared/Brewfile", "brew \"git\"\n");
        self.dir("workspaces/shared/symlinks/git");
        self.file("workspaces/org/workspaces/project/Brewfile", "brew \"jq\"\n");
        self.file("workspaces/org/workspaces/project/defaults.yml", "{}\n");
    }

    /// Lines written by the fake tools so far.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Write an executable script that logs `name $*` and exits with `code`.
fn fake_tool(dir: &Path, name: &str, log: &Path, code: i32) -> String {
    let path = dir.join(name);
    let body = format!(
        "#!/bin/sh\necho \"{name} $*\" >> '{}'\nexit {code}\n",
        log.display()
    );
    fs::write(&path, body).expect("Failed to write fake tool");
    make_executable(&path);
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make tool executable");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
