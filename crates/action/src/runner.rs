//! The invocation pipeline.

use indexmap::IndexMap;
use stratus_core::OperationKind;
use stratus_error::Result;
use stratus_resilience::RetryPolicy;
use stratus_schema::RawInputs;
use tracing::info;

use crate::action::LifecycleAction;
use crate::context::ActionContext;
use crate::outputs::format_outputs;

/// Drives one invocation end to end: validate → execute (with retry) →
/// format outputs.
///
/// Stateless across invocations; holds only the retry policy applied
/// uniformly to the single outbound call each action makes.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    policy: RetryPolicy,
}

impl Runner {
    /// A runner with the default retry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner with an explicit retry policy.
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// The configured retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `action` against `raw` inputs.
    ///
    /// Validation happens first and rejects before any network call; a
    /// failed invocation with bad inputs has no partial side effects. The
    /// execute step is wrapped in the retry policy; for send operations
    /// the action decides per-request whether re-attempts are safe
    /// (see [`LifecycleAction::retry_safe`]).
    pub async fn run(
        &self,
        action: &dyn LifecycleAction,
        raw: &RawInputs,
        ctx: &ActionContext,
    ) -> Result<IndexMap<String, String>> {
        let metadata = action.metadata();

        let request = metadata.schema.validate(raw)?;
        ctx.check_cancelled()?;

        let policy = if action.retry_safe(&request) {
            self.policy.clone()
        } else {
            self.policy.clone().capped_at(1)
        };

        info!(
            execution_id = %ctx.execution_id,
            action = %metadata.key,
            operation = %metadata.operation,
            max_attempts = policy.max_attempts,
            "executing action"
        );

        let result = stratus_resilience::retry(&policy, &metadata.key, &ctx.cancellation, || {
            action.execute(&request, ctx)
        })
        .await?;

        let outputs = format_outputs(metadata, &result)?;

        info!(
            execution_id = %ctx.execution_id,
            action = %metadata.key,
            status = %result.status(),
            "action completed"
        );
        Ok(outputs)
    }
}

/// Whether the runner would re-attempt operations of this kind by default.
///
/// Exists for listings and documentation; the actual decision is
/// per-request via [`LifecycleAction::retry_safe`].
pub fn default_retry_safe(operation: OperationKind) -> bool {
    match operation {
        OperationKind::Create | OperationKind::Delete => true,
        OperationKind::Send => false,
    }
}
