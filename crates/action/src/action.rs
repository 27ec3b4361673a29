//! Action traits.

use async_trait::async_trait;
use stratus_core::OperationKind;
use stratus_error::Result;
use stratus_schema::ActionRequest;

use crate::context::ActionContext;
use crate::metadata::ActionMetadata;
use crate::result::LifecycleResult;

/// Base trait for all actions: identity and metadata.
///
/// Object-safe; the registry stores actions as `Arc<dyn LifecycleAction>`.
pub trait Action: Send + Sync + 'static {
    /// Static metadata describing this action.
    fn metadata(&self) -> &ActionMetadata;

    /// The lifecycle operation kind, from metadata.
    fn operation(&self) -> OperationKind {
        self.metadata().operation
    }
}

/// An executable lifecycle operation.
///
/// Implementations receive a *validated* request (the runner never calls
/// `execute` with inputs that failed the declared schema) and return a
/// whole [`LifecycleResult`] or an error from the shared taxonomy. The
/// runner wraps `execute` in the retry policy, so implementations must be
/// safe to call again after a retryable failure (for sends, see
/// [`retry_safe`](Self::retry_safe)).
#[async_trait]
pub trait LifecycleAction: Action {
    /// Whether a failed attempt may be re-issued without risking a
    /// duplicate effect.
    ///
    /// Creates and deletes converge and default to `true`. A send is only
    /// retry-safe when the request carries the provider's deduplication
    /// id, because a timed-out attempt may already have been delivered.
    fn retry_safe(&self, request: &ActionRequest) -> bool {
        let _ = request;
        true
    }

    /// Perform the resource operation as a single logical step.
    async fn execute(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<LifecycleResult>;
}
