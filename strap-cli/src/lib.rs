//! Library exports for strap-cli.
//!
//! This module exports the CLI structure so integration code and the build
//! script documentation stay in sync with the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
