//! Output formatting.

use indexmap::IndexMap;
use stratus_error::{Result, StratusError};

use crate::metadata::ActionMetadata;
use crate::result::LifecycleResult;

/// Name under which the lifecycle status is emitted, when declared.
pub const STATUS_OUTPUT: &str = "status";

/// Map a [`LifecycleResult`] onto the action's declared output names.
///
/// - declared `status` output → the result's status string
/// - declared required output with no produced field → failure; an
///   incomplete result is never emitted as a degraded success
/// - declared optional output with no produced field → omitted
/// - produced field with no declaration → failure; actions cannot emit
///   outputs the catalog does not document
pub fn format_outputs(
    metadata: &ActionMetadata,
    result: &LifecycleResult,
) -> Result<IndexMap<String, String>> {
    let mut outputs = IndexMap::with_capacity(metadata.outputs.len());

    for output in &metadata.outputs {
        if output.name == STATUS_OUTPUT {
            outputs.insert(STATUS_OUTPUT.to_string(), result.status().as_str().to_string());
            continue;
        }
        match result.get(output.name) {
            Some(value) => {
                outputs.insert(output.name.to_string(), value.to_string());
            }
            None if output.required => {
                return Err(StratusError::internal(format!(
                    "action `{}` produced no value for required output `{}`",
                    metadata.key, output.name
                )));
            }
            None => {}
        }
    }

    for (name, _) in result.fields() {
        if metadata.output(name).is_none() {
            return Err(StratusError::internal(format!(
                "action `{}` produced undeclared output `{name}`",
                metadata.key
            )));
        }
    }

    Ok(outputs)
}
