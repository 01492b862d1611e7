//! Dotted workspace addresses.
//!
//! A workspace address such as `org.project` names a leaf workspace by the
//! chain of directories leading to it. The empty address names the root.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::workspace::CURRENT_SEGMENT;

/// An ordered, immutable sequence of workspace segment names.
///
/// # Examples
///
/// ```
/// use strap::WorkspacePath;
///
/// let path = WorkspacePath::parse("org.project").unwrap();
/// assert_eq!(path.segments(), ["org", "project"]);
/// assert_eq!(path.to_string(), "org.project");
///
/// let root = WorkspacePath::parse("").unwrap();
/// assert!(root.is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WorkspacePath {
    segments: Vec<String>,
}

impl WorkspacePath {
    /// Parses a raw address.
    ///
    /// The raw string is checked for `..` and `/` before it is split, so a
    /// malformed address never reaches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathFormat`] if the address contains `..` or
    /// `/`, or if splitting it produces an empty segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use strap::WorkspacePath;
    ///
    /// assert!(WorkspacePath::parse("team.project").is_ok());
    /// assert!(WorkspacePath::parse("team..project").is_err());
    /// assert!(WorkspacePath::parse("team/project").is_err());
    /// assert!(WorkspacePath::parse(".team").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.contains("..") {
            return Err(invalid(raw, "must not contain '..'"));
        }
        if raw.contains('/') {
            return Err(invalid(raw, "must not contain '/'"));
        }
        if raw.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(invalid(raw, "segments must not be empty"));
        }

        Ok(Self { segments })
    }

    /// The empty address, naming the root directory.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns the segments in address order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the address has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if this address names the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the final segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// A human label: the dotted address, or `(root)` for the empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// use strap::WorkspacePath;
    ///
    /// assert_eq!(WorkspacePath::root().describe(), "(root)");
    /// assert_eq!(WorkspacePath::parse("org.x").unwrap().describe(), "org.x");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }

    /// Returns the segments the traversal engine walks.
    ///
    /// The root address walks the single synthetic segment `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strap::WorkspacePath;
    ///
    /// assert_eq!(WorkspacePath::root().traversal_segments(), ["."]);
    /// ```
    #[must_use]
    pub fn traversal_segments(&self) -> Vec<&str> {
        if self.segments.is_empty() {
            vec![CURRENT_SEGMENT]
        } else {
            self.segments.iter().map(String::as_str).collect()
        }
    }
}

fn invalid(raw: &str, reason: &str) -> Error {
    Error::InvalidPathFormat {
        address: raw.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for WorkspacePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
