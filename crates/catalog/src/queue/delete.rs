//! Delete a message queue.

use std::sync::Arc;

use async_trait::async_trait;
use stratus_action::{
    Action, ActionContext, ActionMetadata, ActionRequest, InputDef, InputSchema, LifecycleAction,
    LifecycleResult, OperationKind, OutputDef,
};
use stratus_error::Result;
use stratus_provider::{is_not_found, QueueApi};
use tracing::info;

/// `queue.delete`: delete a queue, treating "not found" as already clean.
///
/// Safe to call from a cleanup step regardless of whether creation ever
/// ran: a missing queue is success, not an error.
pub struct QueueDeleteAction {
    metadata: ActionMetadata,
    queue: Arc<dyn QueueApi>,
}

impl QueueDeleteAction {
    /// Construct the action over a queue API.
    pub fn new(queue: Arc<dyn QueueApi>) -> Self {
        let metadata = ActionMetadata::new(
            "queue.delete",
            "Delete Queue",
            "Delete a message queue by URL",
            OperationKind::Delete,
        )
        .with_category("queue")
        .with_schema(
            InputSchema::new().with(
                InputDef::text("queue_url")
                    .required()
                    .not_empty()
                    .describe("URL of the queue to delete"),
            ),
        )
        .with_output(OutputDef::required("status", "Always `deleted`"))
        .with_output(OutputDef::optional(
            "existed",
            "`true` if the queue was present, `false` if already gone",
        ));

        Self { metadata, queue }
    }
}

impl Action for QueueDeleteAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl LifecycleAction for QueueDeleteAction {
    async fn execute(
        &self,
        request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<LifecycleResult> {
        let queue_url = request.text("queue_url")?;

        match self.queue.delete_queue(queue_url).await {
            Ok(()) => Ok(LifecycleResult::deleted().with_field("existed", "true")),
            Err(error) if is_not_found(&error) => {
                info!(queue_url, "queue already absent, nothing to delete");
                Ok(LifecycleResult::deleted().with_field("existed", "false"))
            }
            Err(error) => Err(error),
        }
    }
}
