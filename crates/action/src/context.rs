//! Runtime context provided to every action during execution.

use stratus_core::ExecutionId;
use stratus_error::{Result, StratusError};
use tokio_util::sync::CancellationToken;

/// Context for one invocation.
///
/// Constructed by the runner before invoking an action. Actions **must**
/// call [`check_cancelled`](Self::check_cancelled) before expensive steps
/// in multi-call sequences to support cooperative cancellation.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Unique identifier for this invocation.
    pub execution_id: ExecutionId,
    /// Cancellation signal — checked cooperatively by actions, and raced
    /// against in-flight calls by the retry driver.
    pub cancellation: CancellationToken,
}

impl ActionContext {
    /// Create a context with a fresh execution id.
    pub fn new() -> Self {
        Self {
            execution_id: ExecutionId::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Use a pre-existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Check whether execution has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns the cancellation error if the token has been triggered.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            Err(StratusError::cancelled())
        } else {
            Ok(())
        }
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_cancelled_ok() {
        assert!(ActionContext::new().check_cancelled().is_ok());
    }

    #[test]
    fn check_cancelled_after_cancel() {
        let ctx = ActionContext::new();
        ctx.cancellation.cancel();
        let err = ctx.check_cancelled().unwrap_err();
        assert_eq!(err.code, "CANCELLED");
    }

    #[test]
    fn external_token_is_observed() {
        let token = CancellationToken::new();
        let ctx = ActionContext::new().with_cancellation(token.child_token());
        assert!(ctx.check_cancelled().is_ok());
        token.cancel();
        assert!(ctx.check_cancelled().is_err());
    }
}
