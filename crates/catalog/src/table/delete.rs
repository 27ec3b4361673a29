//! Delete a key/value table.

use std::sync::Arc;

use async_trait::async_trait;
use stratus_action::{
    Action, ActionContext, ActionMetadata, ActionRequest, InputDef, InputSchema, LifecycleAction,
    LifecycleResult, OperationKind, OutputDef,
};
use stratus_error::Result;
use stratus_provider::{is_not_found, TableApi};
use tracing::info;

/// `table.delete`: delete a table, treating "not found" as already clean.
pub struct TableDeleteAction {
    metadata: ActionMetadata,
    table: Arc<dyn TableApi>,
}

impl TableDeleteAction {
    /// Construct the action over a table API.
    pub fn new(table: Arc<dyn TableApi>) -> Self {
        let metadata = ActionMetadata::new(
            "table.delete",
            "Delete Table",
            "Delete a key/value table by name",
            OperationKind::Delete,
        )
        .with_category("table")
        .with_schema(
            InputSchema::new().with(
                InputDef::text("table_name")
                    .required()
                    .not_empty()
                    .describe("Name of the table to delete"),
            ),
        )
        .with_output(OutputDef::required("status", "Always `deleted`"))
        .with_output(OutputDef::optional(
            "existed",
            "`true` if the table was present, `false` if already gone",
        ));

        Self { metadata, table }
    }
}

impl Action for TableDeleteAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl LifecycleAction for TableDeleteAction {
    async fn execute(
        &self,
        request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<LifecycleResult> {
        let table_name = request.text("table_name")?;

        match self.table.delete_table(table_name).await {
            Ok(()) => Ok(LifecycleResult::deleted().with_field("existed", "true")),
            Err(error) if is_not_found(&error) => {
                info!(table_name, "table already absent, nothing to delete");
                Ok(LifecycleResult::deleted().with_field("existed", "false"))
            }
            Err(error) => Err(error),
        }
    }
}
