//! Error context for diagnosis without re-running.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Additional context attached to an error as it propagates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Human-readable description of what was being attempted.
    pub description: String,
    /// Extra key-value pairs (resource names, attempt counts, hosts).
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)?;
        if !self.metadata.is_empty() {
            let mut pairs: Vec<_> = self.metadata.iter().collect();
            pairs.sort();
            let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, " [{}]", rendered.join(", "))?;
        }
        Ok(())
    }
}
