//! Send a message to a queue.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use stratus_action::{
    Action, ActionContext, ActionMetadata, ActionRequest, InputDef, InputSchema, LifecycleAction,
    LifecycleResult, OperationKind, OutputDef,
};
use stratus_error::Result;
use stratus_provider::QueueApi;

/// `queue.send`: send one message, returning the provider's message id.
///
/// A send is only retried when the request carries `dedup_id`: without the
/// provider's deduplication mechanism, re-issuing a timed-out send could
/// deliver the message twice.
pub struct QueueSendAction {
    metadata: ActionMetadata,
    queue: Arc<dyn QueueApi>,
}

impl QueueSendAction {
    /// Construct the action over a queue API.
    pub fn new(queue: Arc<dyn QueueApi>) -> Self {
        let metadata = ActionMetadata::new(
            "queue.send",
            "Send Message",
            "Send a message to a queue",
            OperationKind::Send,
        )
        .with_category("queue")
        .with_schema(
            InputSchema::new()
                .with(
                    InputDef::text("queue_url")
                        .required()
                        .not_empty()
                        .describe("URL of the target queue"),
                )
                .with(
                    InputDef::text("message_body")
                        .required()
                        .not_empty()
                        .describe("Message payload"),
                )
                .with(
                    InputDef::string_map("message_attributes")
                        .describe("String message attributes as a JSON object"),
                )
                .with(
                    InputDef::text("dedup_id")
                        .describe("Provider deduplication id; enables safe retries"),
                )
                .with(
                    InputDef::text("group_id")
                        .describe("Message group id, required on FIFO queues"),
                )
                .with(
                    InputDef::integer("delay_seconds")
                        .in_range(0, 900)
                        .describe("Seconds to delay first delivery"),
                ),
        )
        .with_output(OutputDef::required("message_id", "Provider-assigned message id"))
        .with_output(OutputDef::optional(
            "sequence_number",
            "Sequence number, assigned on FIFO queues",
        ))
        .with_output(OutputDef::required("status", "Always `sent`"));

        Self { metadata, queue }
    }
}

impl Action for QueueSendAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl LifecycleAction for QueueSendAction {
    fn retry_safe(&self, request: &ActionRequest) -> bool {
        request.text_opt("dedup_id").is_some()
    }

    async fn execute(
        &self,
        request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<LifecycleResult> {
        let queue_url = request.text("queue_url")?;
        let body = request.text("message_body")?;
        let empty = IndexMap::new();
        let attributes = request.string_map_opt("message_attributes").unwrap_or(&empty);

        let receipt = self
            .queue
            .send_message(
                queue_url,
                body,
                attributes,
                request.text_opt("dedup_id"),
                request.text_opt("group_id"),
                request.integer_opt("delay_seconds"),
            )
            .await?;

        let mut result = LifecycleResult::sent("message_id", receipt.message_id);
        if let Some(sequence_number) = receipt.sequence_number {
            result = result.with_field("sequence_number", sequence_number);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratus_action::{format_outputs, LifecycleStatus};
    use stratus_provider::testing::FakeQueueApi;

    use super::*;

    fn validated(
        action: &QueueSendAction,
        pairs: &[(&str, &str)],
    ) -> Result<ActionRequest> {
        let raw = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        action.metadata().schema.validate(&raw)
    }

    #[tokio::test]
    async fn returns_the_provider_message_id() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueSendAction::new(fake.clone());
        let request = validated(
            &action,
            &[("queue_url", "http://q"), ("message_body", "payload")],
        )
        .unwrap();

        let result = action.execute(&request, &ActionContext::new()).await.unwrap();
        assert_eq!(result.status(), LifecycleStatus::Sent);
        assert_eq!(result.get("message_id"), Some("m-1"));
        assert_eq!(fake.sent().len(), 1);

        // No FIFO group, so no sequence number output.
        let outputs = format_outputs(action.metadata(), &result).unwrap();
        assert!(!outputs.contains_key("sequence_number"));
    }

    #[tokio::test]
    async fn fifo_send_carries_the_sequence_number() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueSendAction::new(fake);
        let request = validated(
            &action,
            &[
                ("queue_url", "http://q.fifo"),
                ("message_body", "payload"),
                ("dedup_id", "run-42"),
                ("group_id", "deploys"),
            ],
        )
        .unwrap();

        let result = action.execute(&request, &ActionContext::new()).await.unwrap();
        assert!(result.get("sequence_number").is_some());
    }

    #[tokio::test]
    async fn retry_safety_follows_the_dedup_id() {
        let action = QueueSendAction::new(Arc::new(FakeQueueApi::new()));

        let without = validated(
            &action,
            &[("queue_url", "http://q"), ("message_body", "b")],
        )
        .unwrap();
        assert!(!action.retry_safe(&without));

        let with = validated(
            &action,
            &[
                ("queue_url", "http://q"),
                ("message_body", "b"),
                ("dedup_id", "run-42"),
            ],
        )
        .unwrap();
        assert!(action.retry_safe(&with));
    }

    #[tokio::test]
    async fn malformed_attribute_map_fails_validation_before_any_call() {
        let fake = Arc::new(FakeQueueApi::new());
        let action = QueueSendAction::new(fake.clone());

        let err = validated(
            &action,
            &[
                ("queue_url", "http://q"),
                ("message_body", "b"),
                ("message_attributes", "{broken"),
            ],
        )
        .unwrap_err();

        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(fake.call_count(), 0);
    }
}
