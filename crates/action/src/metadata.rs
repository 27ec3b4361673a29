//! Static metadata describing an action.

use stratus_core::{InterfaceVersion, OperationKind};
use stratus_schema::InputSchema;

/// One declared output of an action.
#[derive(Debug, Clone)]
pub struct OutputDef {
    /// Output name as later workflow steps consume it.
    pub name: &'static str,
    /// Whether the operation always produces this output.
    ///
    /// A missing required output is a runtime defect and fails the
    /// invocation; optional outputs are simply omitted.
    pub required: bool,
    /// One-line description, surfaced by `stratus list`.
    pub description: &'static str,
}

impl OutputDef {
    /// Declare a required output.
    pub fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: true,
            description,
        }
    }

    /// Declare an optional output.
    pub fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: false,
            description,
        }
    }
}

/// Static metadata describing an action type.
///
/// Used for catalog listing, input validation, and output formatting.
#[derive(Debug, Clone)]
pub struct ActionMetadata {
    /// Unique key identifying this action (e.g. `"queue.create"`).
    pub key: String,
    /// Human-readable display name (e.g. `"Create Queue"`).
    pub name: String,
    /// Short description of what this action does.
    pub description: String,
    /// Category for catalog grouping (e.g. `"queue"`, `"table"`).
    pub category: String,
    /// Interface version — changes only when inputs/outputs change.
    pub version: InterfaceVersion,
    /// The lifecycle operation kind.
    pub operation: OperationKind,
    /// Declared inputs, validated before execution.
    pub schema: InputSchema,
    /// Declared outputs, enforced after execution.
    pub outputs: Vec<OutputDef>,
}

impl ActionMetadata {
    /// Create metadata with the minimum required fields.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        operation: OperationKind,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            category: String::new(),
            version: InterfaceVersion::new(1, 0),
            operation,
            schema: InputSchema::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the catalog category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the interface version (major, minor).
    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version = InterfaceVersion::new(major, minor);
        self
    }

    /// Set the declared input schema.
    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Add a declared output.
    pub fn with_output(mut self, output: OutputDef) -> Self {
        self.outputs.push(output);
        self
    }

    /// Look up a declared output by name.
    pub fn output(&self, name: &str) -> Option<&OutputDef> {
        self.outputs.iter().find(|o| o.name == name)
    }
}
