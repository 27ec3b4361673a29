//! Whole-invocation deadline wrapper.

use std::future::Future;
use std::time::Duration;

use stratus_error::{Result, StratusError};

/// Execute `future` with an overall deadline.
///
/// Wraps the entire retry loop of an invocation, so a caller-imposed
/// `--timeout` cuts short both in-flight calls and pending backoff waits.
/// The resulting `TimeoutError` is distinct from any provider error.
pub async fn timeout<T, F>(operation: &str, limit: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(StratusError::timeout(operation, limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn passes_through_success() {
        let result = timeout("op", Duration::from_secs(1), async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn passes_through_inner_error() {
        let result: Result<()> = timeout("op", Duration::from_secs(1), async {
            Err(StratusError::internal("inner"))
        })
        .await;
        assert_eq!(result.unwrap_err().code, "INTERNAL_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_produces_timeout_error() {
        let result: Result<()> = timeout("queue.create", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.code, "TIMEOUT_ERROR");
        assert!(err.message.contains("queue.create"));
    }
}
