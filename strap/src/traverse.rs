//! The traversal engine.
//!
//! A traversal walks a validated address from the root, threading an
//! explicit cursor instead of changing the process working directory. At
//! each container level it visits the container's `shared` workspace before
//! descending, and it visits the directory the address ends at. Directories
//! merely passed through are never acted on.

use std::path::PathBuf;

use crate::address::WorkspacePath;
use crate::error::{Error, Result};
use crate::workspace::{Role, TraversalStep, WorkspaceNode, CURRENT_SEGMENT, SHARED_DIR};

/// Something done to each directory a traversal visits.
///
/// Actions own their success and failure semantics; the engine only decides
/// where and in which order they run.
pub trait Action {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Acts on one visited directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the action could not be completed. The traversal
    /// stops at the first error.
    fn act(&mut self, step: &TraversalStep) -> Result<()>;
}

/// Walks workspace addresses under a root.
///
/// # Examples
///
/// ```
/// use strap::{Traversal, WorkspacePath};
/// use strap::workspace::Role;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir_all(dir.path().join("workspaces/shared")).unwrap();
/// std::fs::create_dir_all(dir.path().join("workspaces/work")).unwrap();
///
/// let steps = Traversal::new(dir.path())
///     .plan(&WorkspacePath::parse("work").unwrap())
///     .unwrap();
/// let roles: Vec<Role> = steps.iter().map(|s| s.role).collect();
/// assert_eq!(roles, [Role::Shared, Role::Named]);
/// ```
#[derive(Debug, Clone)]
pub struct Traversal {
    root: PathBuf,
}

impl Traversal {
    /// Creates a traversal rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks `address`, calling `visit` for each step in order.
    ///
    /// Each container level crossed yields its `shared` workspace before the
    /// descent, and the last segment yields the target. When the address
    /// names a `shared` workspace itself, that directory is visited once, as
    /// the target, so such a walk has one step fewer than the shared count
    /// plus one.
    ///
    /// # Errors
    ///
    /// Returns the first error returned by `visit`; no later steps are
    /// produced after it.
    pub fn walk<F>(&self, address: &WorkspacePath, mut visit: F) -> Result<()>
    where
        F: FnMut(TraversalStep) -> Result<()>,
    {
        let segments = address.traversal_segments();
        let last_index = segments.len() - 1;
        let final_role = if address.is_root() {
            Role::Root
        } else {
            Role::Named
        };

        let mut cursor = self.root.clone();
        let mut depth = 0;

        for (index, segment) in segments.iter().enumerate() {
            let node = WorkspaceNode::probe(&cursor);
            if node.is_container {
                cursor = node.workspaces_dir();
                if let Some(shared) = node.shared_dir() {
                    // Naming the shared workspace directly visits it once, as the target.
                    let targets_shared = index == last_index && *segment == SHARED_DIR;
                    if !targets_shared {
                        visit(TraversalStep::new(shared, Role::Shared, depth))?;
                    }
                }
                depth += 1;
            }

            if *segment != CURRENT_SEGMENT {
                cursor.push(segment);
            }

            if index == last_index {
                visit(TraversalStep::new(cursor.clone(), final_role, depth))?;
            }
        }

        Ok(())
    }

    /// Walks `address` and runs `action` on every visited directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionFailure`] naming the action and the directory
    /// it failed in. Nothing runs after the failing step.
    pub fn run(
        &self,
        address: &WorkspacePath,
        action: &mut dyn Action,
    ) -> Result<Vec<TraversalStep>> {
        let name = action.name().to_string();
        let mut visited = Vec::new();
        self.walk(address, |step| {
            log::debug!("{name}: {step}");
            action.act(&step).map_err(|source| Error::ActionFailure {
                action: name.clone(),
                path: step.path.clone(),
                source: Box::new(source),
            })?;
            visited.push(step);
            Ok(())
        })?;
        Ok(visited)
    }

    /// Returns the steps a run of `address` would visit, without acting.
    ///
    /// # Errors
    ///
    /// Walking itself does not fail; the result type matches [`Self::walk`].
    pub fn plan(&self, address: &WorkspacePath) -> Result<Vec<TraversalStep>> {
        let mut steps = Vec::new();
        self.walk(address, |step| {
            steps.push(step);
            Ok(())
        })?;
        Ok(steps)
    }
}
