//! The manifest install action.

use crate::actions::path_arg;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::traverse::Action;
use crate::workspace::TraversalStep;

/// Installs the package manifest of each visited workspace.
///
/// A workspace without a manifest is skipped. The installer runs with the
/// workspace as its working directory.
pub struct InstallAction<'a> {
    config: &'a ResolvedConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> InstallAction<'a> {
    /// Creates the action.
    #[must_use]
    pub fn new(config: &'a ResolvedConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }
}

impl Action for InstallAction<'_> {
    fn name(&self) -> &str {
        "install"
    }

    fn act(&mut self, step: &TraversalStep) -> Result<()> {
        let manifest = step.path.join(&self.config.manifest_file);
        if !manifest.is_file() {
            log::info!("no manifest in {}", step.path.display());
            return Ok(());
        }

        let invocation = self
            .config
            .installer
            .render(&[
                ("manifest", path_arg(&manifest)),
                ("dir", path_arg(&step.path)),
            ])?
            .current_dir(&step.path);
        self.runner.run(&invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::runner::{CommandTemplate, MockCommandRunner};
    use crate::workspace::Role;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> ResolvedConfig {
        ResolvedConfig::resolve(Config::default(), root).unwrap()
    }

    #[test]
    fn test_missing_manifest_succeeds_without_commands() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let mut action = InstallAction::new(&config, &runner);
        let step = TraversalStep::new(temp.path(), Role::Root, 0);
        assert!(action.act(&step).is_ok());
    }

    #[test]
    fn test_manifest_runs_installer_in_workspace() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Brewfile"), "brew \"git\"\n").unwrap();
        let config = config(temp.path());
        let manifest = path_arg(&temp.path().join("Brewfile"));
        let dir = temp.path().to_path_buf();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(move |inv| {
                inv.program == "brew"
                    && inv.args == ["bundle", "--no-lock", "--file", manifest.as_str()]
                    && inv.current_dir.as_deref() == Some(dir.as_path())
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut action = InstallAction::new(&config, &runner);
        let step = TraversalStep::new(temp.path(), Role::Named, 1);
        action.act(&step).unwrap();
    }

    #[test]
    fn test_installer_failure_propagates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Pkgfile"), "").unwrap();
        let mut config = config(temp.path());
        config.manifest_file = "Pkgfile".to_string();
        config.installer = CommandTemplate::new("pkg-install", ["{manifest}", "{dir}"]);

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|inv| {
            Err(Error::CommandFailed {
                command: inv.to_string(),
                code: Some(3),
            })
        });

        let mut action = InstallAction::new(&config, &runner);
        let step = TraversalStep::new(temp.path(), Role::Shared, 0);
        let err = action.act(&step).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(3), .. }));
    }
}
