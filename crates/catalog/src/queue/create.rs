//! Create a message queue.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use stratus_action::{
    Action, ActionContext, ActionMetadata, ActionRequest, InputDef, InputSchema, LifecycleAction,
    LifecycleResult, OperationKind, OutputDef,
};
use stratus_error::{Result, StratusError};
use stratus_provider::{is_already_exists, QueueApi};
use tracing::info;

/// `queue.create`: create a message queue, converging on one identity.
///
/// Creation is idempotent through lookup-by-name: when the provider
/// reports the name as taken, the existing queue's URL is resolved and
/// returned with status `already-exists` instead of failing. Two
/// concurrent creates for the same name therefore both succeed.
pub struct QueueCreateAction {
    metadata: ActionMetadata,
    queue: Arc<dyn QueueApi>,
}

impl QueueCreateAction {
    /// Construct the action over a queue API.
    pub fn new(queue: Arc<dyn QueueApi>) -> Self {
        let metadata = ActionMetadata::new(
            "queue.create",
            "Create Queue",
            "Create a message queue, returning its URL",
            OperationKind::Create,
        )
        .with_category("queue")
        .with_schema(
            InputSchema::new()
                .with(
                    InputDef::text("queue_name")
                        .required()
                        .not_empty()
                        .with_constraint(stratus_action::Constraint::MaxLength(80))
                        .describe("Name of the queue to create"),
                )
                .with(
                    InputDef::integer("visibility_timeout")
                        .in_range(0, 43_200)
                        .describe("Seconds a received message stays hidden"),
                )
                .with(
                    InputDef::integer("message_retention_seconds")
                        .in_range(60, 1_209_600)
                        .describe("Seconds the queue retains messages"),
                )
                .with(
                    InputDef::boolean("fifo")
                        .with_default("false")
                        .describe("Create a FIFO queue (name must end in `.fifo`)"),
                )
                .with(
                    InputDef::string_map("tags")
                        .describe("Resource tags as a JSON object of strings"),
                ),
        )
        .with_output(OutputDef::required("queue_url", "URL of the queue"))
        .with_output(OutputDef::required("queue_name", "Name of the queue"))
        .with_output(OutputDef::required("status", "`created` or `already-exists`"));

        Self { metadata, queue }
    }
}

impl Action for QueueCreateAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl LifecycleAction for QueueCreateAction {
    async fn execute(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<LifecycleResult> {
        let name = request.text("queue_name")?;
        let fifo = request.boolean("fifo")?;

        // Cross-field rule the declared schema cannot express.
        if fifo && !name.ends_with(".fifo") {
            return Err(StratusError::validation(
                "queue_name",
                "must end with `.fifo` when `fifo` is true",
            ));
        }

        let mut attributes = IndexMap::new();
        if let Some(timeout) = request.integer_opt("visibility_timeout") {
            attributes.insert("VisibilityTimeout".to_string(), timeout.to_string());
        }
        if let Some(retention) = request.integer_opt("message_retention_seconds") {
            attributes.insert("MessageRetentionPeriod".to_string(), retention.to_string());
        }
        if fifo {
            attributes.insert("FifoQueue".to_string(), "true".to_string());
        }
        let empty = IndexMap::new();
        let tags = request.string_map_opt("tags").unwrap_or(&empty);

        match self.queue.create_queue(name, &attributes, tags).await {
            Ok(url) => Ok(LifecycleResult::created("queue_url", url)
                .with_field("queue_name", name)),
            Err(error) if is_already_exists(&error) => {
                ctx.check_cancelled()?;
                info!(queue_name = name, "queue already exists, resolving its URL");
                let url = self.queue.get_queue_url(name).await?;
                Ok(LifecycleResult::already_exists("queue_url", url)
                    .with_field("queue_name", name))
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratus_action::{format_outputs, LifecycleStatus};
    use stratus_provider::testing::FakeQueueApi;

    use super::*;

    fn validated(
        action: &QueueCreateAction,
        pairs: &[(&str, &str)],
    ) -> Result<ActionRequest> {
        let raw = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        action.metadata().schema.validate(&raw)
    }

    #[tokio::test]
    async fn creates_a_queue_and_returns_its_url() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueCreateAction::new(fake.clone());
        let request = validated(
            &action,
            &[("queue_name", "test-queue"), ("visibility_timeout", "60")],
        )
        .unwrap();

        let result = action.execute(&request, &ActionContext::new()).await.unwrap();
        assert_eq!(result.status(), LifecycleStatus::Created);
        assert!(fake.has_queue("test-queue"));

        let outputs = format_outputs(action.metadata(), &result).unwrap();
        assert_eq!(outputs.get("queue_name").unwrap(), "test-queue");
        assert_eq!(outputs.get("status").unwrap(), "created");
    }

    #[tokio::test]
    async fn second_create_converges_on_the_same_url() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueCreateAction::new(fake.clone());
        let request = validated(
            &action,
            &[("queue_name", "test-queue"), ("visibility_timeout", "60")],
        )
        .unwrap();
        let ctx = ActionContext::new();

        let first = action.execute(&request, &ctx).await.unwrap();
        let second = action.execute(&request, &ctx).await.unwrap();

        assert_eq!(first.get("queue_url"), second.get("queue_url"));
        assert_eq!(first.status(), LifecycleStatus::Created);
        assert_eq!(second.status(), LifecycleStatus::AlreadyExists);
    }

    #[tokio::test]
    async fn fifo_requires_the_fifo_suffix() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueCreateAction::new(fake.clone());
        let request =
            validated(&action, &[("queue_name", "plain"), ("fifo", "true")]).unwrap();

        let err = action
            .execute(&request, &ActionContext::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        // Rejected before any provider call.
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_tags_fail_schema_validation() {
        let action = QueueCreateAction::new(Arc::new(FakeQueueApi::new()));
        let err = validated(&action, &[("queue_name", "q"), ("tags", "{oops")]).unwrap_err();
        assert!(err.message.contains("tags"));
    }

    #[tokio::test]
    async fn non_exists_errors_propagate() {
        let fake = Arc::new(FakeQueueApi::new());
        fake.inject_failure(StratusError::permanent_provider(
            "create",
            "q",
            "AccessDeniedException",
            "denied",
        ));
        let action = QueueCreateAction::new(fake);
        let request = validated(&action, &[("queue_name", "q")]).unwrap();

        let err = action
            .execute(&request, &ActionContext::new())
            .await
            .unwrap_err();
        assert_eq!(err.provider_code(), Some("AccessDeniedException"));
    }
}
