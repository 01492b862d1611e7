//! Workspace directories as seen on disk.
//!
//! A workspace is a directory that may receive the install and finalize
//! actions. A workspace holding a `workspaces` subdirectory is a container
//! whose children are addressable workspaces; a container's
//! `workspaces/shared` directory is visited whenever the container is
//! crossed.
//!
//! Nothing here caches the filesystem: every probe reads the disk again.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Name of the subdirectory that turns a workspace into a container.
pub const WORKSPACES_DIR: &str = "workspaces";

/// Name of the per-container shared workspace.
pub const SHARED_DIR: &str = "shared";

/// The synthetic segment naming the current cursor directory.
pub const CURRENT_SEGMENT: &str = ".";

/// A directory probed for its workspace structure.
///
/// # Examples
///
/// ```
/// use strap::workspace::WorkspaceNode;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir_all(dir.path().join("workspaces/shared")).unwrap();
///
/// let node = WorkspaceNode::probe(dir.path());
/// assert!(node.is_container);
/// assert!(node.has_shared_sibling);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceNode {
    /// The directory.
    pub path: PathBuf,
    /// Whether the directory has a `workspaces` subdirectory.
    pub is_container: bool,
    /// Whether the directory is a container with a `workspaces/shared` directory.
    pub has_shared_sibling: bool,
}

impl WorkspaceNode {
    /// Probes `path` for its container structure.
    #[must_use]
    pub fn probe(path: &Path) -> Self {
        let is_container = is_container(path);
        let has_shared_sibling =
            is_container && path.join(WORKSPACES_DIR).join(SHARED_DIR).is_dir();
        Self {
            path: path.to_path_buf(),
            is_container,
            has_shared_sibling,
        }
    }

    /// The `workspaces` subdirectory of this node.
    #[must_use]
    pub fn workspaces_dir(&self) -> PathBuf {
        self.path.join(WORKSPACES_DIR)
    }

    /// The shared workspace of this node, if it is a container that has one.
    #[must_use]
    pub fn shared_dir(&self) -> Option<PathBuf> {
        self.has_shared_sibling
            .then(|| self.workspaces_dir().join(SHARED_DIR))
    }
}

/// Returns true if `path` has a `workspaces` subdirectory.
#[must_use]
pub fn is_container(path: &Path) -> bool {
    path.join(WORKSPACES_DIR).is_dir()
}

/// Why a directory is being acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The shared workspace of a container that was crossed.
    Shared,
    /// The leaf workspace the address names.
    Named,
    /// The root itself, when it has no workspaces.
    Root,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::Named => write!(f, "named"),
            Self::Root => write!(f, "root"),
        }
    }
}

/// A directory produced by a traversal, with the reason it is visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalStep {
    /// The directory to act on.
    pub path: PathBuf,
    /// Why the directory is visited.
    pub role: Role,
    /// Number of container levels crossed before this step.
    pub depth: usize,
}

impl TraversalStep {
    /// Creates a new step.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, role: Role, depth: usize) -> Self {
        Self {
            path: path.into(),
            role,
            depth,
        }
    }
}

impl fmt::Display for TraversalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.role)
    }
}

/// One addressable entry in a [`WorkspaceTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceEntry {
    /// Dotted address naming this workspace.
    pub address: String,
    /// The workspace directory.
    pub path: PathBuf,
    /// Whether the workspace is itself a container.
    pub is_container: bool,
    /// Whether this is a container's shared workspace.
    pub is_shared: bool,
    /// Nesting level, starting at zero for the root's workspaces.
    pub depth: usize,
}

/// Every workspace reachable under a root, in depth-first name order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkspaceTree {
    /// The root the tree was read from.
    pub root: PathBuf,
    /// The entries, parents before children.
    pub entries: Vec<WorkspaceEntry>,
}

impl WorkspaceTree {
    /// Reads the workspace tree under `root`.
    ///
    /// A root without a `workspaces` directory yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a `workspaces` directory cannot be read.
    pub fn read(root: &Path) -> Result<Self> {
        let mut tree = Self {
            root: root.to_path_buf(),
            entries: Vec::new(),
        };
        tree.collect(root, "", 0)?;
        Ok(tree)
    }

    /// Addresses that can be bootstrapped: every leaf, shared units included.
    #[must_use]
    pub fn leaves(&self) -> Vec<&WorkspaceEntry> {
        self.entries.iter().filter(|e| !e.is_container).collect()
    }

    fn collect(&mut self, dir: &Path, prefix: &str, depth: usize) -> Result<()> {
        if !is_container(dir) {
            return Ok(());
        }

        for (name, path) in sorted_subdirs(&dir.join(WORKSPACES_DIR))? {
            let address = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            let container = is_container(&path);
            self.entries.push(WorkspaceEntry {
                address: address.clone(),
                path: path.clone(),
                is_container: container,
                is_shared: name == SHARED_DIR,
                depth,
            });
            self.collect(&path, &address, depth + 1)?;
        }

        Ok(())
    }
}

/// Lists the immediate subdirectories of `dir` sorted by name.
///
/// Entries whose names are not valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dirs.push((name.to_string(), path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
