//! Bootstrap orchestration.
//!
//! A bootstrap validates the address, runs the preflight commands, then runs
//! the install pass over the whole traversal followed by the finalize pass.
//! Every validation error surfaces before any command runs.

use std::path::PathBuf;

use serde::Serialize;

use crate::actions::{path_arg, Pass};
use crate::address::WorkspacePath;
use crate::config::ResolvedConfig;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation, RecordingRunner, SystemRunner};
use crate::traverse::Traversal;
use crate::validate::StructureValidator;
use crate::workspace::TraversalStep;

/// Runs bootstraps against one workspace root.
///
/// # Examples
///
/// ```
/// use strap::config::{Config, ResolvedConfig};
/// use strap::runner::RecordingRunner;
/// use strap::{Bootstrap, WorkspacePath};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("Brewfile"), "").unwrap();
///
/// let config = ResolvedConfig::resolve(Config::default(), dir.path()).unwrap();
/// let bootstrap = Bootstrap::new(config, RecordingRunner::new());
/// let report = bootstrap.run(&WorkspacePath::root()).unwrap();
///
/// assert_eq!(report.install.len(), 1);
/// assert_eq!(bootstrap.runner().invocations()[0].program, "brew");
/// ```
#[derive(Debug)]
pub struct Bootstrap<R = SystemRunner> {
    config: ResolvedConfig,
    runner: R,
    validator: StructureValidator,
    traversal: Traversal,
}

impl<R: CommandRunner> Bootstrap<R> {
    /// Creates a bootstrap for `config.root` that runs commands with `runner`.
    pub fn new(config: ResolvedConfig, runner: R) -> Self {
        let validator = StructureValidator::new(config.root.clone());
        let traversal = Traversal::new(config.root.clone());
        Self {
            config,
            runner,
            validator,
            traversal,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// The runner commands are issued through.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Checks that the root exists and `address` resolves to a leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the root is not a directory, or the
    /// validation error for the address.
    pub fn check(&self, address: &WorkspacePath) -> Result<()> {
        if !self.config.root.is_dir() {
            return Err(Error::InvalidPath {
                path: self.config.root.clone(),
                reason: "workspace root is not a directory".to_string(),
            });
        }
        self.validator.validate(address)
    }

    /// Describes what a run of `address` would do without running anything.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or an error if a template cannot be
    /// rendered or a workspace directory cannot be read.
    pub fn plan(&self, address: &WorkspacePath) -> Result<BootstrapPlan> {
        self.check(address)?;

        let recorder = RecordingRunner::new();
        let preflight = if self.config.skip_preflight {
            Vec::new()
        } else {
            self.preflight_invocations()?
        };

        let steps = self.traversal.plan(address)?;
        let mut passes = Vec::with_capacity(Pass::ALL.len());
        for pass in Pass::ALL {
            let mut action = pass.action(&self.config, &recorder);
            let mut entries = Vec::with_capacity(steps.len());
            for step in &steps {
                action.act(step)?;
                entries.push(PlanEntry {
                    pass,
                    step: step.clone(),
                    invocations: recorder.take(),
                });
            }
            passes.push(PassPlan { pass, entries });
        }

        Ok(BootstrapPlan {
            address: address.to_string(),
            root: self.config.root.clone(),
            preflight,
            passes,
        })
    }

    /// Bootstraps `address`.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything runs, or
    /// [`Error::ActionFailure`] for the first failing preflight command or
    /// action, after which nothing else runs.
    pub fn run(&self, address: &WorkspacePath) -> Result<BootstrapReport> {
        self.check(address)?;

        let mut report = BootstrapReport {
            address: address.to_string(),
            preflight: Vec::new(),
            install: Vec::new(),
            finalize: Vec::new(),
        };

        if self.config.skip_preflight {
            log::info!("skipping preflight");
        } else {
            for invocation in self.preflight_invocations()? {
                self.runner
                    .run(&invocation)
                    .map_err(|source| Error::ActionFailure {
                        action: "preflight".to_string(),
                        path: self.config.root.clone(),
                        source: Box::new(source),
                    })?;
                report.preflight.push(invocation);
            }
        }

        for pass in Pass::ALL {
            log::info!("==> {pass} {}", address.describe());
            let mut action = pass.action(&self.config, &self.runner);
            let visited = self.traversal.run(address, action.as_mut())?;
            match pass {
                Pass::Install => report.install = visited,
                Pass::Finalize => report.finalize = visited,
            }
        }

        Ok(report)
    }

    fn preflight_invocations(&self) -> Result<Vec<Invocation>> {
        let root = path_arg(&self.config.root);
        self.config
            .preflight
            .iter()
            .map(|template| {
                Ok(template
                    .render(&[("root", root.clone())])?
                    .current_dir(&self.config.root))
            })
            .collect()
    }
}

/// What a bootstrap would do, pass by pass.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapPlan {
    /// The planned address.
    pub address: String,
    /// The workspace root.
    pub root: PathBuf,
    /// Preflight commands, empty when skipped.
    pub preflight: Vec<Invocation>,
    /// Both passes, in execution order.
    pub passes: Vec<PassPlan>,
}

impl BootstrapPlan {
    /// The plan for one pass.
    #[must_use]
    pub fn pass(&self, pass: Pass) -> Option<&PassPlan> {
        self.passes.iter().find(|p| p.pass == pass)
    }
}

/// One pass of a [`BootstrapPlan`].
#[derive(Debug, Clone, Serialize)]
pub struct PassPlan {
    /// The pass.
    pub pass: Pass,
    /// One entry per visited directory.
    pub entries: Vec<PlanEntry>,
}

/// A visited directory and the commands acting on it would run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    /// The pass this entry belongs to.
    pub pass: Pass,
    /// The visited directory.
    pub step: TraversalStep,
    /// Commands that would run, in order.
    pub invocations: Vec<Invocation>,
}

impl PlanEntry {
    /// A one-line summary such as `install /dots/workspaces/shared (shared): 1 command`.
    #[must_use]
    pub fn description(&self) -> String {
        let count = self.invocations.len();
        let noun = if count == 1 { "command" } else { "commands" };
        format!("{} {}: {count} {noun}", self.pass, self.step)
    }
}

/// What a completed bootstrap did.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    /// The bootstrapped address.
    pub address: String,
    /// Preflight commands that ran.
    pub preflight: Vec<Invocation>,
    /// Directories the install pass visited.
    pub install: Vec<TraversalStep>,
    /// Directories the finalize pass visited.
    pub finalize: Vec<TraversalStep>,
}
