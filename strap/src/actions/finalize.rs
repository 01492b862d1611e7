//! The finalize action: hook scripts, defaults and symlinks.

use std::path::Path;

use crate::actions::path_arg;
use crate::actions::scripts::{executable_scripts, AFTER_DIR, BEFORE_DIR, RUN_DIR};
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};
use crate::traverse::Action;
use crate::workspace::{sorted_subdirs, TraversalStep};

/// Finalizes each visited workspace.
///
/// In order: `run/before` scripts, the defaults file, one linker run per
/// package under the symlinks directory, then `run/after` scripts. The first
/// failure aborts the rest.
pub struct FinalizeAction<'a> {
    config: &'a ResolvedConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> FinalizeAction<'a> {
    /// Creates the action.
    #[must_use]
    pub fn new(config: &'a ResolvedConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    fn run_scripts(&self, dir: &Path, stage: &str) -> Result<()> {
        for script in executable_scripts(&dir.join(RUN_DIR).join(stage))? {
            let invocation = Invocation::new(path_arg(&script)).current_dir(dir);
            self.runner.run(&invocation)?;
        }
        Ok(())
    }

    fn apply_defaults(&self, dir: &Path) -> Result<()> {
        let file = dir.join(&self.config.defaults_file);
        if !file.is_file() {
            return Ok(());
        }

        let invocation = self
            .config
            .defaults_applier
            .render(&[("file", path_arg(&file)), ("dir", path_arg(dir))])?
            .current_dir(dir);
        self.runner.run(&invocation)
    }

    fn link_packages(&self, dir: &Path) -> Result<()> {
        let source = dir.join(&self.config.symlinks_dir);
        if !source.is_dir() {
            return Ok(());
        }

        for (package, _) in sorted_subdirs(&source)? {
            let invocation = self
                .config
                .linker
                .render(&[
                    ("source", path_arg(&source)),
                    ("package", package),
                    ("target", path_arg(&self.config.link_target)),
                    ("dir", path_arg(dir)),
                ])?
                .current_dir(dir);
            self.runner.run(&invocation)?;
        }
        Ok(())
    }
}

impl Action for FinalizeAction<'_> {
    fn name(&self) -> &str {
        "finalize"
    }

    fn act(&mut self, step: &TraversalStep) -> Result<()> {
        let dir = step.path.as_path();
        self.run_scripts(dir, BEFORE_DIR)?;
        self.apply_defaults(dir)?;
        self.link_packages(dir)?;
        self.run_scripts(dir, AFTER_DIR)
    }
}
