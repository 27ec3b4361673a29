//! Create a key/value table.

use std::sync::Arc;

use async_trait::async_trait;
use stratus_action::{
    Action, ActionContext, ActionMetadata, ActionRequest, InputDef, InputSchema, LifecycleAction,
    LifecycleResult, OperationKind, OutputDef,
};
use stratus_error::Result;
use stratus_provider::{is_already_exists, TableApi};
use tracing::info;

/// `table.create`: create a key/value table.
///
/// The table service has no create-if-absent call, so the "already exists"
/// condition is resolved through a describe lookup: the existing table's
/// ARN comes back with status `already-exists` rather than a failure.
pub struct TableCreateAction {
    metadata: ActionMetadata,
    table: Arc<dyn TableApi>,
}

impl TableCreateAction {
    /// Construct the action over a table API.
    pub fn new(table: Arc<dyn TableApi>) -> Self {
        let metadata = ActionMetadata::new(
            "table.create",
            "Create Table",
            "Create a key/value table, returning its ARN",
            OperationKind::Create,
        )
        .with_category("table")
        .with_schema(
            InputSchema::new()
                .with(
                    InputDef::text("table_name")
                        .required()
                        .not_empty()
                        .with_constraint(stratus_action::Constraint::MaxLength(255))
                        .describe("Name of the table to create"),
                )
                .with(
                    InputDef::text("hash_key")
                        .with_default("id")
                        .not_empty()
                        .describe("Name of the partition key attribute"),
                )
                .with(
                    InputDef::text("hash_key_type")
                        .with_default("S")
                        .one_of(vec!["S", "N", "B"])
                        .describe("Partition key type: string, number, or binary"),
                ),
        )
        .with_output(OutputDef::required("table_arn", "ARN of the table"))
        .with_output(OutputDef::required("table_status", "Provider lifecycle status"))
        .with_output(OutputDef::required("status", "`created` or `already-exists`"));

        Self { metadata, table }
    }
}

impl Action for TableCreateAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl LifecycleAction for TableCreateAction {
    async fn execute(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<LifecycleResult> {
        let name = request.text("table_name")?;
        let hash_key = request.text("hash_key")?;
        let hash_key_type = request.text("hash_key_type")?;

        match self.table.create_table(name, hash_key, hash_key_type).await {
            Ok(description) => Ok(LifecycleResult::created("table_arn", description.arn)
                .with_field("table_status", description.status)),
            Err(error) if is_already_exists(&error) => {
                ctx.check_cancelled()?;
                info!(table_name = name, "table already exists, describing it");
                let description = self.table.describe_table(name).await?;
                Ok(
                    LifecycleResult::already_exists("table_arn", description.arn)
                        .with_field("table_status", description.status),
                )
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratus_action::LifecycleStatus;
    use stratus_provider::testing::FakeTableApi;

    use super::*;

    fn validated(action: &TableCreateAction, pairs: &[(&str, &str)]) -> ActionRequest {
        let raw = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        action.metadata().schema.validate(&raw).unwrap()
    }

    #[tokio::test]
    async fn creates_a_table_with_defaulted_key_schema() {
        let fake = Arc::new(FakeTableApi::new());
        let action = TableCreateAction::new(fake.clone());
        let request = validated(&action, &[("table_name", "runs")]);

        let result = action.execute(&request, &ActionContext::new()).await.unwrap();
        assert_eq!(result.status(), LifecycleStatus::Created);
        assert!(result.get("table_arn").unwrap().ends_with("table/runs"));
        assert!(fake.has_table("runs"));
    }

    #[tokio::test]
    async fn second_create_resolves_the_existing_identity() {
        let fake = Arc::new(FakeTableApi::new());
        let action = TableCreateAction::new(fake.clone());
        let request = validated(&action, &[("table_name", "runs")]);
        let ctx = ActionContext::new();

        let first = action.execute(&request, &ctx).await.unwrap();
        let second = action.execute(&request, &ctx).await.unwrap();

        assert_eq!(first.get("table_arn"), second.get("table_arn"));
        assert_eq!(second.status(), LifecycleStatus::AlreadyExists);
        // create (conflict) + describe, after the initial create.
        assert_eq!(fake.call_count(), 3);
    }

    #[tokio::test]
    async fn key_type_is_constrained() {
        let action = TableCreateAction::new(Arc::new(FakeTableApi::new()));
        let raw = [
            ("table_name".to_string(), "runs".to_string()),
            ("hash_key_type".to_string(), "X".to_string()),
        ]
        .into_iter()
        .collect();
        let err = action.metadata().schema.validate(&raw).unwrap_err();
        assert_eq!(
            err.message,
            "input `hash_key_type`: must be one of S, N, B"
        );
    }
}
