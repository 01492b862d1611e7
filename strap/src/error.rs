//! Error types for the strap library.
//!
//! This module provides the error hierarchy for address parsing, structure
//! validation, traversal and the external commands the actions invoke,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strap error.
///
/// # Examples
///
/// ```
/// use strap::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strap library.
#[derive(Debug, Error)]
pub enum Error {
    /// The workspace address string is malformed.
    #[error("invalid workspace address '{address}': {reason}")]
    InvalidPathFormat {
        /// The raw address as given.
        address: String,
        /// Why the address was rejected.
        reason: String,
    },

    /// The root holds a `workspaces` directory but no address was given.
    #[error("a workspace must be named: {} contains workspaces", root.display())]
    MissingWorkspaceArgument {
        /// The root directory.
        root: PathBuf,
    },

    /// An address was given but the root has no `workspaces` directory.
    #[error("unexpected workspace '{address}': {} has no workspaces", root.display())]
    UnexpectedWorkspaceArgument {
        /// The root directory.
        root: PathBuf,
        /// The address that was given.
        address: String,
    },

    /// A segment of the address does not name an existing directory.
    #[error("unknown workspace '{address}': {} does not exist", path.display())]
    UnknownWorkspace {
        /// The directory the segment resolved to.
        path: PathBuf,
        /// The full address being resolved.
        address: String,
    },

    /// The address ends at a container instead of a leaf workspace.
    #[error("cannot bootstrap container {}: name one of its workspaces", path.display())]
    CannotBootstrapContainer {
        /// The container directory.
        path: PathBuf,
    },

    /// An action failed while acting on a directory.
    #[error("{action} failed in {}: {source}", path.display())]
    ActionFailure {
        /// Name of the action that failed.
        action: String,
        /// The directory the action was acting on.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// An external command exited unsuccessfully.
    #[error("command `{command}` {}", describe_exit(*.code))]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// The exit code, if the process exited normally.
        code: Option<i32>,
    },

    /// An external command could not be started.
    #[error("failed to start `{program}`: {source}")]
    CommandSpawn {
        /// The program that could not be started.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl Error {
    /// Check if the error was caused by the workspace address or the
    /// structure it addresses, rather than by an action.
    ///
    /// # Examples
    ///
    /// ```
    /// use strap::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::CannotBootstrapContainer { path: PathBuf::from("/dots/workspaces/org") };
    /// assert!(err.is_address_error());
    /// ```
    #[must_use]
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPathFormat { .. }
                | Self::MissingWorkspaceArgument { .. }
                | Self::UnexpectedWorkspaceArgument { .. }
                | Self::UnknownWorkspace { .. }
                | Self::CannotBootstrapContainer { .. }
        )
    }

    /// Check if the error came from an action or an external command.
    #[must_use]
    pub fn is_action_failure(&self) -> bool {
        matches!(
            self,
            Self::ActionFailure { .. } | Self::CommandFailed { .. } | Self::CommandSpawn { .. }
        )
    }
}
