//! Build script for strap-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn address_arg() -> Arg {
    Arg::new("address")
        .value_name("ADDRESS")
        .help("Dotted workspace address, e.g. org.project (default: the root)")
}

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("strap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bootstrap a machine from nested workspaces")
        .long_about(
            "Installs package manifests, then runs scripts, applies defaults and links \
             dotfiles for a workspace and every shared workspace above it",
        )
        .disable_version_flag(true)
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Print version")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Root directory of the workspace tree (default: current directory)")
                .value_name("PATH")
                .global(true)
                .env("STRAP_ROOT"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("STRAP_DATA_DIR"),
        )
        .arg(address_arg())
        .subcommands(vec![
            Command::new("bootstrap")
                .about("Install, then finalize, a workspace and its shared workspaces")
                .arg(address_arg())
                .arg(
                    Arg::new("skip-preflight")
                        .long("skip-preflight")
                        .help("Do not run the configured preflight commands")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("check")
                .about("Validate a workspace address without running anything")
                .arg(address_arg()),
            Command::new("plan")
                .about("Show what a bootstrap would run")
                .arg(address_arg()),
            Command::new("list").about("List the addressable workspaces"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("strap.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
