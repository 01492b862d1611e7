//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]` so
//! they never observe each other's variables.

mod common;

use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use common::{programs, TreeFixture};
use strap::config::ConfigBuilder;
use strap::error::Error;
use strap::{Bootstrap, RecordingRunner, WorkspacePath};

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old_value {
            Some(ref value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
#[serial]
fn test_precedence_env_over_root_file_over_user_config() {
    let data = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(
        data.path(),
        "config.yaml",
        "manifest_file: UserFile\ndefaults_file: user.yml\nsymlinks_dir: user-links\n",
    );
    write(
        root.path(),
        "strap.yaml",
        "manifest_file: RootFile\ndefaults_file: root.yml\n",
    );
    let _guard = EnvGuard::new("STRAP_MANIFEST_FILE", "EnvFile");

    let config = ConfigBuilder::new()
        .with_data_dir(data.path())
        .with_working_dir(root.path())
        .build()
        .unwrap();

    assert_eq!(config.manifest_file, "EnvFile");
    assert_eq!(config.defaults_file, "root.yml");
    assert_eq!(config.symlinks_dir, "user-links");
}

#[test]
#[serial]
fn test_invalid_env_bool_is_validation_error() {
    let root = TempDir::new().unwrap();
    let _guard = EnvGuard::new("STRAP_SKIP_PREFLIGHT", "perhaps");

    let result = ConfigBuilder::new()
        .with_data_dir(root.path())
        .with_working_dir(root.path())
        .build();

    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
#[serial]
fn test_configured_commands_drive_bootstrap() {
    let data = TempDir::new().unwrap();
    let tree = TreeFixture::new()
        .file("Pkgfile", "jq\n")
        .dir("links/vim")
        .file(
            "strap.yaml",
            "manifest_file: Pkgfile\n\
             symlinks_dir: links\n\
             installer:\n  program: pkg\n  args: [install, '{manifest}']\n\
             linker:\n  program: ln-farm\n  args: ['{source}', '{package}']\n\
             preflight:\n  - program: check-net\n",
        )
        .build();
    let _guard = EnvGuard::new("STRAP_LINK_TARGET", "/tmp");

    let config = ConfigBuilder::new()
        .with_data_dir(data.path())
        .with_working_dir(tree.path())
        .build()
        .unwrap();
    let bootstrap = Bootstrap::new(config, RecordingRunner::new());
    bootstrap.run(&WorkspacePath::root()).unwrap();

    assert_eq!(
        programs(bootstrap.runner()),
        ["check-net", "pkg", "ln-farm"]
    );
    let link = &bootstrap.runner().invocations()[2];
    assert_eq!(link.args[1], "vim");
}

#[test]
fn test_unknown_placeholder_in_root_file_rejected() {
    let data = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(
        root.path(),
        "strap.yaml",
        "installer:\n  program: brew\n  args: ['{package}']\n",
    );

    let err = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(data.path())
        .with_working_dir(root.path())
        .build()
        .unwrap_err();

    assert!(format!("{err}").contains("installer"));
}

#[test]
fn test_unknown_field_rejected() {
    let data = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "strap.yaml", "manifest: Brewfile\n");

    let result = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(data.path())
        .with_working_dir(root.path())
        .build();

    assert!(matches!(result, Err(Error::Configuration(_))));
}
