//! The validated, typed request handed to an action.

use std::time::Duration;

use indexmap::IndexMap;
use stratus_error::{Result, StratusError};

use crate::value::InputValue;

/// A validated action request: declared input name → typed value.
///
/// Constructed only by [`InputSchema::validate`](crate::InputSchema::validate).
/// Every accessor that returns `Result` is for inputs the schema declares
/// with the matching kind; a mismatch means the action asked for an input
/// it never declared, which is an internal error rather than user fault.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    values: IndexMap<String, InputValue>,
}

impl ActionRequest {
    pub(crate) fn new(values: IndexMap<String, InputValue>) -> Self {
        Self { values }
    }

    /// Whether the input was supplied (or defaulted).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The raw typed value, if present.
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key)
    }

    /// A required text input.
    pub fn text(&self, key: &str) -> Result<&str> {
        self.get(key)
            .and_then(InputValue::as_text)
            .ok_or_else(|| undeclared(key, "text"))
    }

    /// An optional text input.
    pub fn text_opt(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(InputValue::as_text)
    }

    /// A required integer input.
    pub fn integer(&self, key: &str) -> Result<i64> {
        self.get(key)
            .and_then(InputValue::as_integer)
            .ok_or_else(|| undeclared(key, "integer"))
    }

    /// An optional integer input.
    pub fn integer_opt(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(InputValue::as_integer)
    }

    /// A required boolean input.
    pub fn boolean(&self, key: &str) -> Result<bool> {
        self.get(key)
            .and_then(InputValue::as_boolean)
            .ok_or_else(|| undeclared(key, "boolean"))
    }

    /// An optional boolean input.
    pub fn boolean_opt(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(InputValue::as_boolean)
    }

    /// An optional duration input.
    pub fn duration_opt(&self, key: &str) -> Option<Duration> {
        self.get(key).and_then(InputValue::as_duration)
    }

    /// An optional JSON document input.
    pub fn json_opt(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).and_then(InputValue::as_json)
    }

    /// An optional string-map input.
    pub fn string_map_opt(&self, key: &str) -> Option<&IndexMap<String, String>> {
        self.get(key).and_then(InputValue::as_string_map)
    }

    /// Iterate values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of validated inputs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no inputs were validated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn undeclared(key: &str, kind: &str) -> StratusError {
    StratusError::internal(format!(
        "action read input `{key}` as {kind}, but its schema declares no such input"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ActionRequest {
        let mut values = IndexMap::new();
        values.insert("name".to_string(), InputValue::Text("jobs".into()));
        values.insert("count".to_string(), InputValue::Integer(3));
        ActionRequest::new(values)
    }

    #[test]
    fn typed_accessors() {
        let req = request();
        assert_eq!(req.text("name").unwrap(), "jobs");
        assert_eq!(req.integer("count").unwrap(), 3);
        assert!(req.text_opt("missing").is_none());
    }

    #[test]
    fn kind_mismatch_is_internal() {
        let req = request();
        let err = req.boolean("name").unwrap_err();
        assert_eq!(err.code, "INTERNAL_ERROR");
    }

    #[test]
    fn iteration_preserves_declaration_order() {
        let req = request();
        let keys: Vec<&str> = req.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "count"]);
    }
}
