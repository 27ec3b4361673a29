//! The lifecycle operation discriminant.

use serde::{Deserialize, Serialize};

/// The kind of lifecycle operation an action performs.
///
/// Every cataloged action is one of these three shapes; the runner uses the
/// discriminant to apply operation-specific policy (e.g. capping retries on
/// non-idempotent sends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Create a resource; converges on one identity when repeated.
    Create,
    /// Delete a resource; a missing resource is already-clean success.
    Delete,
    /// Send a message or record; returns the provider-assigned identifier.
    Send,
}

impl OperationKind {
    /// Stable lowercase name, used in log fields and error context.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Send => "send",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
