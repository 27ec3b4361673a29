//! Typed input values.

use std::time::Duration;

use indexmap::IndexMap;

/// A validated, typed input value.
///
/// Produced only by [`InputSchema::validate`](crate::InputSchema::validate);
/// actions never see raw strings for non-text inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Free-form text.
    Text(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A boolean (`true` / `false`).
    Boolean(bool),
    /// A duration expressed in whole seconds.
    Duration(Duration),
    /// An arbitrary JSON document.
    Json(serde_json::Value),
    /// A flat string-to-string map, supplied as a JSON object.
    StringMap(IndexMap<String, String>),
}

impl InputValue {
    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The duration content, if this is a duration value.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// The JSON document, if this is a JSON value.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// The string map, if this is a string-map value.
    pub fn as_string_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::StringMap(m) => Some(m),
            _ => None,
        }
    }

    /// A short name for the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Duration(_) => "duration",
            Self::Json(_) => "json",
            Self::StringMap(_) => "string map",
        }
    }
}
