//! Input declarations.

use crate::constraint::Constraint;

/// The kind of value an input parses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Free-form text, passed through as-is.
    Text,
    /// Base-10 integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Whole seconds, parsed as a non-negative integer.
    DurationSeconds,
    /// Any JSON document.
    Json,
    /// JSON object whose values are all strings.
    StringMap,
}

impl InputKind {
    /// What the parser expected, used in error messages.
    pub fn expectation(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "an integer",
            Self::Boolean => "`true` or `false`",
            Self::DurationSeconds => "a duration in whole seconds",
            Self::Json => "a JSON document",
            Self::StringMap => "a JSON object of strings",
        }
    }
}

/// One declared input: name, kind, required flag, default, constraints.
///
/// Declaration order in the schema is validation order, so error messages
/// are reproducible across runs.
#[derive(Debug, Clone)]
pub struct InputDef {
    /// The input name as the orchestrator supplies it.
    pub key: &'static str,
    /// The kind the raw string must parse to.
    pub kind: InputKind,
    /// Whether the input must be present (or defaulted).
    pub required: bool,
    /// Raw default applied when the input is absent.
    pub default: Option<&'static str>,
    /// Constraints checked after parsing.
    pub constraints: Vec<Constraint>,
    /// One-line description, surfaced by `stratus list`.
    pub description: &'static str,
}

impl InputDef {
    fn new(key: &'static str, kind: InputKind) -> Self {
        Self {
            key,
            kind,
            required: false,
            default: None,
            constraints: Vec::new(),
            description: "",
        }
    }

    /// Declare a text input.
    pub fn text(key: &'static str) -> Self {
        Self::new(key, InputKind::Text)
    }

    /// Declare an integer input.
    pub fn integer(key: &'static str) -> Self {
        Self::new(key, InputKind::Integer)
    }

    /// Declare a boolean input.
    pub fn boolean(key: &'static str) -> Self {
        Self::new(key, InputKind::Boolean)
    }

    /// Declare a duration-in-seconds input.
    pub fn duration_seconds(key: &'static str) -> Self {
        Self::new(key, InputKind::DurationSeconds)
    }

    /// Declare a JSON document input.
    pub fn json(key: &'static str) -> Self {
        Self::new(key, InputKind::Json)
    }

    /// Declare a string-map input (JSON object of strings).
    pub fn string_map(key: &'static str) -> Self {
        Self::new(key, InputKind::StringMap)
    }

    /// Mark this input required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Supply a default used when the input is absent.
    pub fn with_default(mut self, raw: &'static str) -> Self {
        self.default = Some(raw);
        self
    }

    /// Attach a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Shorthand for [`Constraint::NotEmpty`].
    pub fn not_empty(self) -> Self {
        self.with_constraint(Constraint::NotEmpty)
    }

    /// Shorthand for [`Constraint::Range`].
    pub fn in_range(self, min: i64, max: i64) -> Self {
        self.with_constraint(Constraint::Range { min, max })
    }

    /// Shorthand for [`Constraint::OneOf`].
    pub fn one_of(self, allowed: Vec<&'static str>) -> Self {
        self.with_constraint(Constraint::OneOf(allowed))
    }

    /// Set the one-line description.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates() {
        let def = InputDef::integer("visibility_timeout")
            .with_default("30")
            .in_range(0, 43_200)
            .describe("Seconds a received message stays hidden");

        assert_eq!(def.key, "visibility_timeout");
        assert_eq!(def.kind, InputKind::Integer);
        assert!(!def.required);
        assert_eq!(def.default, Some("30"));
        assert_eq!(def.constraints.len(), 1);
    }
}
