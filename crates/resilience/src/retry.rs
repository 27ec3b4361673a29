//! Retry policy and driver.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stratus_error::{Result, StratusError};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Jitter applied to a computed backoff delay.
///
/// Spreads concurrent retriers so a throttled provider is not hit by a
/// synchronized wave of re-attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jitter {
    /// Use the computed delay exactly.
    None,
    /// `random(0, delay)`.
    Full,
    /// `delay/2 + random(0, delay/2)`.
    Equal,
}

impl Jitter {
    /// Apply this jitter to a computed delay.
    pub fn apply(self, delay: Duration) -> Duration {
        let millis = delay.as_millis() as u64;
        match self {
            Self::None => delay,
            Self::Full => {
                if millis == 0 {
                    delay
                } else {
                    Duration::from_millis(fastrand::u64(0..=millis))
                }
            }
            Self::Equal => {
                let half = millis / 2;
                let jitter = if half > 0 { fastrand::u64(0..=half) } else { 0 };
                Duration::from_millis(half + jitter)
            }
        }
    }
}

/// Bounded exponential-backoff retry configuration.
///
/// Applies uniformly to the single outbound call an action makes.
/// Retryability is decided by the error itself, not the policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first attempt.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound on any single delay, pre-jitter.
    pub max_delay: Duration,
    /// Growth factor per attempt.
    pub multiplier: f64,
    /// Jitter applied to each computed delay.
    pub jitter: Jitter,
    /// Deadline applied to each individual attempt.
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(20),
            multiplier: 2.0,
            jitter: Jitter::Equal,
            attempt_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RetryPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that never re-attempts.
    ///
    /// Used for operations where a timed-out first attempt may already have
    /// taken effect (e.g. a send without a deduplication id).
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set the attempt budget. Clamped to at least one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the delay before the second attempt.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the pre-jitter delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the growth factor.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the jitter mode.
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set or clear the per-attempt deadline.
    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Cap the attempt budget without raising it.
    pub fn capped_at(mut self, max_attempts: u32) -> Self {
        self.max_attempts = self.max_attempts.min(max_attempts.max(1));
        self
    }

    /// The jittered delay to sleep after a failed `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let raw = self.base_delay.as_millis() as f64 * self.multiplier.powi(exponent as i32);
        let capped = Duration::from_millis((raw as u64).min(self.max_delay.as_millis() as u64));
        self.jitter.apply(capped)
    }
}

/// Drive `op` under `policy` until it succeeds, fails terminally, exhausts
/// the attempt budget, or `cancellation` fires.
///
/// Only errors with [`StratusError::is_retryable`] are re-attempted. Each
/// re-attempt is logged with the attempt number and the delay slept before
/// it. The provider's `retry_after` hint, when present, overrides the
/// computed delay. The error surfaced after exhaustion is the last
/// underlying error.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    cancellation: &CancellationToken,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if cancellation.is_cancelled() {
            return Err(StratusError::cancelled());
        }

        let outcome = run_attempt(policy, operation, cancellation, op()).await;

        let error = match outcome {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !error.is_retryable() || attempt == max_attempts {
            return Err(error);
        }

        let delay = error.retry_after().unwrap_or_else(|| policy.delay_for(attempt));
        warn!(
            operation,
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "retrying after transient failure"
        );

        tokio::select! {
            () = cancellation.cancelled() => return Err(StratusError::cancelled()),
            () = sleep(delay) => {}
        }
    }

    // Unreachable: the loop always returns from its final iteration.
    Err(StratusError::internal(format!(
        "retry loop for `{operation}` exited without an outcome"
    )))
}

async fn run_attempt<T, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    cancellation: &CancellationToken,
    attempt: Fut,
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match policy.attempt_timeout {
        Some(limit) => tokio::select! {
            () = cancellation.cancelled() => Err(StratusError::cancelled()),
            outcome = tokio::time::timeout(limit, attempt) => match outcome {
                Ok(result) => result,
                Err(_) => Err(StratusError::timeout(operation, limit)),
            },
        },
        None => tokio::select! {
            () = cancellation.cancelled() => Err(StratusError::cancelled()),
            result = attempt => result,
        },
    }
}
