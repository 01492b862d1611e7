//! Main entry point for the strap CLI.
//!
//! This is the command-line interface for bootstrapping a machine from a
//! tree of nested workspaces:
//! - `bootstrap` (or a bare address): install, then finalize, a workspace
//! - `check`: validate an address
//! - `plan`: dry run
//! - `list`: list the addressable workspaces

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Help and version go to stdout with status 0; usage errors exit 4
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                CliError::InvalidArguments(e.kind().to_string()).exit_code()
            } else {
                0
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let _level = strap::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        root: cli.root,
        data_dir: cli.data_dir,
    };

    let command = cli.command.unwrap_or(Command::Bootstrap(cli.bootstrap));
    let result = match command {
        Command::Bootstrap(cmd) => cmd.execute(&global),
        Command::Check(cmd) => cmd.execute(&global),
        Command::Plan(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
