//! Value constraints attached to input declarations.

use crate::value::InputValue;

/// A declarative constraint checked after a raw input parses to its kind.
///
/// Constraints describe themselves in human terms; the violation message
/// becomes the `constraint` half of a `ValidationError`.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Text must be non-empty after trimming.
    NotEmpty,
    /// Text length must not exceed the limit.
    MaxLength(usize),
    /// Integer (or duration in seconds) must fall within the inclusive range.
    Range {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// Text must equal one of the listed values.
    OneOf(Vec<&'static str>),
    /// String-map keys and values must not exceed the length limit.
    MapEntryMaxLength(usize),
}

impl Constraint {
    /// Check `value` against this constraint.
    ///
    /// Returns `Err(description)` with the violated-constraint wording on
    /// failure. Constraints that do not apply to the value's kind pass;
    /// kind mismatches are caught earlier, at parse time.
    pub fn check(&self, value: &InputValue) -> Result<(), String> {
        match self {
            Self::NotEmpty => {
                if let InputValue::Text(s) = value {
                    if s.trim().is_empty() {
                        return Err("must not be empty".to_string());
                    }
                }
                Ok(())
            }
            Self::MaxLength(limit) => {
                if let InputValue::Text(s) = value {
                    if s.chars().count() > *limit {
                        return Err(format!("must be at most {limit} characters"));
                    }
                }
                Ok(())
            }
            Self::Range { min, max } => {
                let n = match value {
                    InputValue::Integer(n) => Some(*n),
                    InputValue::Duration(d) => Some(d.as_secs() as i64),
                    _ => None,
                };
                if let Some(n) = n {
                    if n < *min || n > *max {
                        return Err(format!("must be between {min} and {max}, got {n}"));
                    }
                }
                Ok(())
            }
            Self::OneOf(allowed) => {
                if let InputValue::Text(s) = value {
                    if !allowed.contains(&s.as_str()) {
                        return Err(format!("must be one of {}", allowed.join(", ")));
                    }
                }
                Ok(())
            }
            Self::MapEntryMaxLength(limit) => {
                if let InputValue::StringMap(map) = value {
                    for (k, v) in map {
                        if k.chars().count() > *limit || v.chars().count() > *limit {
                            return Err(format!(
                                "map entry `{k}` exceeds {limit} characters"
                            ));
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
