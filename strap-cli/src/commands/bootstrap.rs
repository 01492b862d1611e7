//! Bootstrap command implementation.
//!
//! This module implements the `bootstrap` command, which is also what a bare
//! `strap [ADDRESS]` runs.

use crate::error::CliError;
use crate::utils::{load_configuration, parse_address, GlobalOptions};
use clap::Args;
use strap::{Bootstrap, Config, SystemRunner};

/// Install, then finalize, a workspace and its shared workspaces.
#[derive(Args)]
pub struct BootstrapCommand {
    /// Dotted workspace address, e.g. `org.project` (default: the root)
    #[arg(value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Do not run the configured preflight commands
    #[arg(long)]
    pub skip_preflight: bool,
}

impl BootstrapCommand {
    /// Execute the bootstrap command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let address = parse_address(self.address.as_deref())?;

        let overrides = Config {
            skip_preflight: self.skip_preflight.then_some(true),
            ..Default::default()
        };
        let config = load_configuration(global, overrides)?;

        let report = Bootstrap::new(config, SystemRunner).run(&address)?;

        if !global.quiet {
            eprintln!(
                "Bootstrapped {}: {} workspace(s) installed and finalized",
                address.describe(),
                report.finalize.len()
            );
        }

        Ok(())
    }
}
