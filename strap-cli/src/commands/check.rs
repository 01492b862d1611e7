//! Check command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, parse_address, GlobalOptions};
use clap::Args;
use strap::{Bootstrap, Config, SystemRunner};

/// Validate a workspace address without running anything.
#[derive(Args)]
pub struct CheckCommand {
    /// Dotted workspace address (default: the root)
    #[arg(value_name = "ADDRESS")]
    pub address: Option<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let address = parse_address(self.address.as_deref())?;
        let config = load_configuration(global, Config::default())?;

        Bootstrap::new(config, SystemRunner).check(&address)?;

        if !global.quiet {
            println!("workspace {} is valid", address.describe());
        }
        Ok(())
    }
}
