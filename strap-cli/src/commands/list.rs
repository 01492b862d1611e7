//! List command implementation.
//!
//! This module implements the `list` command, which displays the workspace
//! tree under the root as dotted addresses.

use crate::error::CliError;
use crate::utils::{load_configuration, shorten_path, GlobalOptions};
use clap::Args;
use std::io::Write;
use strap::workspace::WorkspaceEntry;
use strap::{Config, WorkspaceTree};

/// List the addressable workspaces.
#[derive(Args)]
pub struct ListCommand {
    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,

    /// Only list workspaces that can be bootstrapped
    #[arg(long)]
    pub leaves: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let mut tree = WorkspaceTree::read(&config.root)?;
        if self.leaves {
            tree.entries = tree.leaves().into_iter().cloned().collect();
        }

        if self.json {
            let json = serde_json::to_string_pretty(&tree).map_err(|e| CliError::Io(e.into()))?;
            println!("{json}");
        } else {
            format_as_tree(&tree, global.quiet)?;
        }

        Ok(())
    }
}

/// Format entries as an indented tree, one address per line.
fn format_as_tree(tree: &WorkspaceTree, quiet: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if tree.entries.is_empty() {
        if !quiet {
            eprintln!(
                "{} has no workspaces; run `strap` there with no address",
                shorten_path(&tree.root)
            );
        }
        return Ok(());
    }

    for entry in &tree.entries {
        writeln!(
            handle,
            "{}{}{}",
            "  ".repeat(entry.depth),
            entry.address,
            marker(entry)
        )?;
    }

    Ok(())
}

fn marker(entry: &WorkspaceEntry) -> &'static str {
    if entry.is_container {
        " (container)"
    } else if entry.is_shared {
        " (shared)"
    } else {
        ""
    }
}
