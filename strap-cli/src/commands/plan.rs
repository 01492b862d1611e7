//! Plan command implementation.
//!
//! This module implements the `plan` command, a dry run that prints every
//! directory each pass would visit and the commands it would run there.

use crate::error::CliError;
use crate::utils::{load_configuration, parse_address, shorten_path, GlobalOptions};
use clap::Args;
use std::io::Write;
use strap::{Bootstrap, BootstrapPlan, Config, Pass, RecordingRunner};

/// Show what a bootstrap would run.
#[derive(Args)]
pub struct PlanCommand {
    /// Dotted workspace address (default: the root)
    #[arg(value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Only show one pass
    #[arg(long, value_enum)]
    pub pass: Option<Pass>,

    /// Leave out the preflight commands
    #[arg(long)]
    pub skip_preflight: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlanCommand {
    /// Execute the plan command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let address = parse_address(self.address.as_deref())?;

        let overrides = Config {
            skip_preflight: self.skip_preflight.then_some(true),
            ..Default::default()
        };
        let config = load_configuration(global, overrides)?;

        let mut plan = Bootstrap::new(config, RecordingRunner::new()).plan(&address)?;
        if let Some(pass) = self.pass {
            plan.passes.retain(|p| p.pass == pass);
            plan.preflight.clear();
        }

        if self.json {
            let json = serde_json::to_string_pretty(&plan).map_err(|e| CliError::Io(e.into()))?;
            println!("{json}");
        } else {
            print_plan(&plan, &address.describe())?;
        }

        Ok(())
    }
}

/// Print a plan as indented text.
fn print_plan(plan: &BootstrapPlan, label: &str) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Plan for {label} in {}", shorten_path(&plan.root))?;

    if !plan.preflight.is_empty() {
        writeln!(handle, "preflight:")?;
        for invocation in &plan.preflight {
            writeln!(handle, "    $ {invocation}")?;
        }
    }

    for pass in &plan.passes {
        writeln!(handle, "{}:", pass.pass)?;
        for entry in &pass.entries {
            writeln!(handle, "  {}", entry.description())?;
            if entry.invocations.is_empty() {
                writeln!(handle, "    (nothing to do)")?;
            }
            for invocation in &entry.invocations {
                writeln!(handle, "    $ {invocation}")?;
            }
        }
    }

    Ok(())
}
