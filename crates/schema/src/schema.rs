//! The declared schema and its validation walk.

use std::time::Duration;

use indexmap::IndexMap;
use stratus_error::{Result, StratusError};

use crate::def::{InputDef, InputKind};
use crate::request::ActionRequest;
use crate::value::InputValue;

/// The flat string mapping an invocation supplies, before validation.
pub type RawInputs = IndexMap<String, String>;

/// An action's declared inputs, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    inputs: Vec<InputDef>,
}

impl InputSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration. Order of calls is validation order.
    pub fn with(mut self, def: InputDef) -> Self {
        self.inputs.push(def);
        self
    }

    /// The declarations, in order.
    pub fn inputs(&self) -> &[InputDef] {
        &self.inputs
    }

    /// Whether a given input name is declared.
    pub fn declares(&self, key: &str) -> bool {
        self.inputs.iter().any(|d| d.key == key)
    }

    /// Validate a raw input mapping into a typed [`ActionRequest`].
    ///
    /// Walks declarations in order: resolve (value, default, or absent),
    /// parse to the declared kind, then check constraints. The first
    /// violation aborts with a `ValidationError` naming the field and the
    /// violated constraint. Unknown inputs are rejected afterwards, in
    /// alphabetical order, so the outcome never depends on map iteration
    /// order.
    pub fn validate(&self, raw: &RawInputs) -> Result<ActionRequest> {
        let mut values = IndexMap::with_capacity(self.inputs.len());

        for def in &self.inputs {
            let supplied = raw.get(def.key).map(String::as_str);
            let resolved = supplied.or(def.default);

            let Some(raw_value) = resolved else {
                if def.required {
                    return Err(StratusError::validation(def.key, "is required"));
                }
                continue;
            };

            let value = parse_value(def, raw_value)?;
            for constraint in &def.constraints {
                constraint
                    .check(&value)
                    .map_err(|violation| StratusError::validation(def.key, violation))?;
            }
            values.insert(def.key.to_string(), value);
        }

        let mut unknown: Vec<&str> = raw
            .keys()
            .map(String::as_str)
            .filter(|k| !self.declares(k))
            .collect();
        unknown.sort_unstable();
        if let Some(first) = unknown.first() {
            return Err(StratusError::validation(
                *first,
                "is not a declared input of this action",
            ));
        }

        Ok(ActionRequest::new(values))
    }
}

fn parse_value(def: &InputDef, raw: &str) -> Result<InputValue> {
    let mismatch = || {
        StratusError::validation(
            def.key,
            format!("expected {}, got `{raw}`", def.kind.expectation()),
        )
    };

    match def.kind {
        InputKind::Text => Ok(InputValue::Text(raw.to_string())),
        InputKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(InputValue::Integer)
            .map_err(|_| mismatch()),
        InputKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(InputValue::Boolean(true)),
            "false" => Ok(InputValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        InputKind::DurationSeconds => raw
            .trim()
            .parse::<u64>()
            .map(|secs| InputValue::Duration(Duration::from_secs(secs)))
            .map_err(|_| mismatch()),
        InputKind::Json => serde_json::from_str::<serde_json::Value>(raw)
            .map(InputValue::Json)
            .map_err(|_| mismatch()),
        InputKind::StringMap => {
            let value: serde_json::Value = serde_json::from_str(raw).map_err(|_| mismatch())?;
            let serde_json::Value::Object(object) = value else {
                return Err(mismatch());
            };
            let mut map = IndexMap::with_capacity(object.len());
            for (k, v) in object {
                let serde_json::Value::String(s) = v else {
                    return Err(StratusError::validation(
                        def.key,
                        format!("expected a string value for map entry `{k}`"),
                    ));
                };
                map.insert(k, s);
            }
            Ok(InputValue::StringMap(map))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn queue_schema() -> InputSchema {
        InputSchema::new()
            .with(InputDef::text("queue_name").required().not_empty())
            .with(
                InputDef::integer("visibility_timeout")
                    .with_default("30")
                    .in_range(0, 43_200),
            )
            .with(InputDef::string_map("tags"))
            .with(InputDef::boolean("fifo").with_default("false"))
    }

    fn raw(pairs: &[(&str, &str)]) -> RawInputs {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn well_formed_inputs_validate() {
        let request = queue_schema()
            .validate(&raw(&[
                ("queue_name", "test-queue"),
                ("visibility_timeout", "60"),
                ("tags", r#"{"team":"infra"}"#),
            ]))
            .unwrap();

        assert_eq!(request.text("queue_name").unwrap(), "test-queue");
        assert_eq!(request.integer("visibility_timeout").unwrap(), 60);
        assert_eq!(
            request.string_map_opt("tags").unwrap().get("team").unwrap(),
            "infra"
        );
        assert!(!request.boolean("fifo").unwrap());
    }

    #[test]
    fn missing_required_input_names_the_field() {
        let err = queue_schema().validate(&raw(&[])).unwrap_err();
        assert_eq!(err.message, "input `queue_name`: is required");
        assert!(err.is_pre_network());
    }

    #[test]
    fn default_applies_when_absent() {
        let request = queue_schema()
            .validate(&raw(&[("queue_name", "q")]))
            .unwrap();
        assert_eq!(request.integer("visibility_timeout").unwrap(), 30);
    }

    #[rstest]
    #[case("not-a-number", "expected an integer, got `not-a-number`")]
    #[case("12.5", "expected an integer, got `12.5`")]
    fn non_numeric_timeout_is_rejected(#[case] raw_value: &str, #[case] expected: &str) {
        let err = queue_schema()
            .validate(&raw(&[("queue_name", "q"), ("visibility_timeout", raw_value)]))
            .unwrap_err();
        assert_eq!(err.message, format!("input `visibility_timeout`: {expected}"));
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let err = queue_schema()
            .validate(&raw(&[("queue_name", "q"), ("visibility_timeout", "90000")]))
            .unwrap_err();
        assert_eq!(
            err.message,
            "input `visibility_timeout`: must be between 0 and 43200, got 90000"
        );
    }

    #[test]
    fn malformed_json_tag_map_is_rejected() {
        let err = queue_schema()
            .validate(&raw(&[("queue_name", "q"), ("tags", "{not json")]))
            .unwrap_err();
        assert_eq!(
            err.message,
            "input `tags`: expected a JSON object of strings, got `{not json`"
        );
    }

    #[test]
    fn non_string_tag_value_is_rejected() {
        let err = queue_schema()
            .validate(&raw(&[("queue_name", "q"), ("tags", r#"{"count":3}"#)]))
            .unwrap_err();
        assert_eq!(
            err.message,
            "input `tags`: expected a string value for map entry `count`"
        );
    }

    #[test]
    fn unknown_input_is_rejected_deterministically() {
        // Two unknown keys: alphabetically first is reported, regardless of
        // the order they were supplied in.
        let err = queue_schema()
            .validate(&raw(&[
                ("queue_name", "q"),
                ("zz_typo", "1"),
                ("aa_typo", "2"),
            ]))
            .unwrap_err();
        assert_eq!(
            err.message,
            "input `aa_typo`: is not a declared input of this action"
        );
    }

    #[test]
    fn validation_order_is_declaration_order() {
        // Both inputs are invalid; the first declared wins.
        let err = queue_schema()
            .validate(&raw(&[("queue_name", "  "), ("visibility_timeout", "nope")]))
            .unwrap_err();
        assert_eq!(err.message, "input `queue_name`: must not be empty");
    }
}
