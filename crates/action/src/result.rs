//! Lifecycle results.

use indexmap::IndexMap;

/// How the operation concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStatus {
    /// The resource was created by this invocation.
    Created,
    /// The resource already existed; its identity was resolved, not recreated.
    AlreadyExists,
    /// The resource is gone: deleted now, or already absent.
    Deleted,
    /// The message was accepted by the provider.
    Sent,
}

impl LifecycleStatus {
    /// Stable string form, emitted as the `status` output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyExists => "already-exists",
            Self::Deleted => "deleted",
            Self::Sent => "sent",
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a successful lifecycle operation.
///
/// Produced exactly once on success and never partially populated: the
/// constructors take the primary identifier up front, and the only
/// mutation is adding secondary metadata fields. Field names are the
/// declared output names; the formatter enforces the declaration both
/// ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleResult {
    status: LifecycleStatus,
    fields: IndexMap<String, String>,
}

impl LifecycleResult {
    fn with_primary(
        status: LifecycleStatus,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(field.into(), value.into());
        Self { status, fields }
    }

    /// A resource created by this invocation, identified by `value` under
    /// the declared output name `field`.
    pub fn created(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_primary(LifecycleStatus::Created, field, value)
    }

    /// A pre-existing resource whose identity was resolved.
    pub fn already_exists(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_primary(LifecycleStatus::AlreadyExists, field, value)
    }

    /// A deletion outcome; deletion has no primary identifier.
    pub fn deleted() -> Self {
        Self {
            status: LifecycleStatus::Deleted,
            fields: IndexMap::new(),
        }
    }

    /// A send acknowledged by the provider.
    pub fn sent(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_primary(LifecycleStatus::Sent, field, value)
    }

    /// Attach a secondary metadata field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The conclusion status.
    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    /// A produced field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All produced fields, in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn constructors_carry_the_primary_identifier() {
        let result = LifecycleResult::created("queue_url", "http://sqs/q")
            .with_field("queue_name", "q");
        assert_eq!(result.status(), LifecycleStatus::Created);
        assert_eq!(result.get("queue_url"), Some("http://sqs/q"));
        assert_eq!(result.get("queue_name"), Some("q"));
    }

    #[test]
    fn deleted_has_no_fields() {
        let result = LifecycleResult::deleted();
        assert_eq!(result.status(), LifecycleStatus::Deleted);
        assert_eq!(result.fields().count(), 0);
    }

    #[test]
    fn status_strings_are_stable() {
        assert_eq!(LifecycleStatus::Created.as_str(), "created");
        assert_eq!(LifecycleStatus::AlreadyExists.as_str(), "already-exists");
        assert_eq!(LifecycleStatus::Deleted.as_str(), "deleted");
        assert_eq!(LifecycleStatus::Sent.as_str(), "sent");
    }
}
