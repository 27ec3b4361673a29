//! Interface versioning for action metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version of an action's input/output interface.
///
/// Changes only when the declared schema changes: a minor bump adds
/// optional inputs or outputs, a major bump is anything breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceVersion {
    /// Incremented for breaking schema changes.
    pub major: u32,
    /// Incremented for backward-compatible additions.
    pub minor: u32,
}

impl InterfaceVersion {
    /// Create a version from major/minor components.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether an implementation at `other` satisfies a requirement of `self`.
    ///
    /// Same major, and at least the required minor.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.major == other.major && other.minor >= self.minor
    }
}

impl fmt::Display for InterfaceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
