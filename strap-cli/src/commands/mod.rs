//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `bootstrap`: Install, then finalize, a workspace
//! - `check`: Validate a workspace address
//! - `plan`: Show what a bootstrap would run
//! - `list`: List the addressable workspaces
//! - `completions`: Generate shell completion scripts

pub mod bootstrap;
pub mod check;
pub mod completions;
pub mod list;
pub mod plan;

pub use bootstrap::BootstrapCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use list::ListCommand;
pub use plan::PlanCommand;
