//! Structure validation for workspace addresses.
//!
//! Validation walks an address against the directory tree before anything
//! runs. It only reads the filesystem, so it can be repeated safely, and
//! every malformed address is reported before the first action.

use std::path::PathBuf;

use crate::address::WorkspacePath;
use crate::error::{Error, Result};
use crate::workspace::{is_container, CURRENT_SEGMENT, WORKSPACES_DIR};

/// Validates workspace addresses against a root directory.
///
/// # Examples
///
/// ```
/// use strap::{StructureValidator, WorkspacePath};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir_all(dir.path().join("workspaces/work")).unwrap();
///
/// let validator = StructureValidator::new(dir.path());
/// assert!(validator.validate(&WorkspacePath::parse("work").unwrap()).is_ok());
/// assert!(validator.validate(&WorkspacePath::root()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StructureValidator {
    root: PathBuf,
}

impl StructureValidator {
    /// Creates a validator for the tree under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Validates `address` against the tree.
    ///
    /// The cursor descends into a `workspaces` directory wherever one exists,
    /// exactly as the traversal does, so a validated address resolves to the
    /// same directories the actions will later see.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingWorkspaceArgument`] if the address is empty but the
    ///   root has workspaces
    /// - [`Error::UnexpectedWorkspaceArgument`] if the address is non-empty
    ///   but the root has no workspaces
    /// - [`Error::UnknownWorkspace`] if a segment names no directory
    /// - [`Error::CannotBootstrapContainer`] if the last segment is a container
    pub fn validate(&self, address: &WorkspacePath) -> Result<()> {
        let root_is_container = is_container(&self.root);

        if address.is_root() {
            if root_is_container {
                return Err(Error::MissingWorkspaceArgument {
                    root: self.root.clone(),
                });
            }
            return Ok(());
        }

        if !root_is_container {
            return Err(Error::UnexpectedWorkspaceArgument {
                root: self.root.clone(),
                address: address.to_string(),
            });
        }

        let last_index = address.len() - 1;
        let mut cursor = self.root.clone();

        for (index, segment) in address.segments().iter().enumerate() {
            if is_container(&cursor) {
                cursor.push(WORKSPACES_DIR);
            }

            if segment != CURRENT_SEGMENT {
                let candidate = cursor.join(segment);
                if !candidate.is_dir() {
                    return Err(Error::UnknownWorkspace {
                        path: candidate,
                        address: address.to_string(),
                    });
                }
                cursor = candidate;
            }

            if index == last_index && is_container(&cursor) {
                return Err(Error::CannotBootstrapContainer { path: cursor });
            }
        }

        log::debug!("workspace '{address}' resolves to {}", cursor.display());
        Ok(())
    }
}
