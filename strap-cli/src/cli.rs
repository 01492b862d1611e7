//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BootstrapCommand, CheckCommand, CompletionsCommand, ListCommand, PlanCommand,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Bootstrap a machine from a tree of nested workspaces.
///
/// `strap ADDRESS` is shorthand for `strap bootstrap ADDRESS`.
#[derive(Parser)]
#[command(name = "strap")]
#[command(version, about = "Bootstrap a machine from nested workspaces", long_about = None)]
#[command(disable_version_flag = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Root directory of the workspace tree (default: current directory)
    #[arg(long, value_name = "PATH", global = true, env = "STRAP_ROOT")]
    pub root: Option<PathBuf>,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "STRAP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub bootstrap: BootstrapCommand,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Install, then finalize, a workspace and its shared workspaces
    Bootstrap(BootstrapCommand),

    /// Validate a workspace address without running anything
    Check(CheckCommand),

    /// Show what a bootstrap would run
    Plan(PlanCommand),

    /// List the addressable workspaces
    List(ListCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
