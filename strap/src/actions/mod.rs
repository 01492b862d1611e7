//! The two passes of a bootstrap and the actions that perform them.
//!
//! [`InstallAction`] installs each visited workspace's package manifest.
//! [`FinalizeAction`] runs its scripts, applies its defaults and links its
//! symlink packages. Both are safe to repeat, so a failed run can simply be
//! started again.

mod finalize;
mod install;
pub mod scripts;

use std::fmt;
use std::path::Path;

use serde::Serialize;

pub use finalize::FinalizeAction;
pub use install::InstallAction;

use crate::config::ResolvedConfig;
use crate::runner::CommandRunner;
use crate::traverse::Action;

/// A pass over the traversal of an address.
///
/// The install pass completes before the finalize pass starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    /// Install package manifests.
    Install,
    /// Run scripts, apply defaults and link dotfiles.
    Finalize,
}

impl Pass {
    /// Both passes, in execution order.
    pub const ALL: [Self; 2] = [Self::Install, Self::Finalize];

    /// Creates the action performing this pass.
    #[must_use]
    pub fn action<'a>(
        self,
        config: &'a ResolvedConfig,
        runner: &'a dyn CommandRunner,
    ) -> Box<dyn Action + 'a> {
        match self {
            Self::Install => Box::new(InstallAction::new(config, runner)),
            Self::Finalize => Box::new(FinalizeAction::new(config, runner)),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Finalize => write!(f, "finalize"),
        }
    }
}

/// Renders a path as a command argument.
pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
