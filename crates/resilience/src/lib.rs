//! Retry and timeout primitives for the Stratus runtime.
//!
//! One invocation performs one outbound call; this crate bounds it. The
//! [`retry`] driver re-attempts only errors classified retryable by
//! [`stratus_error::StratusError::is_retryable`], sleeping an exponentially
//! growing, jittered delay between attempts, and surfaces the *last*
//! underlying error when the budget is exhausted, never a synthesized one.
//! Backoff sleeps and in-flight attempts both abort promptly on
//! cancellation.

#![warn(missing_docs)]

mod retry;
mod timeout;

pub use retry::{retry, Jitter, RetryPolicy};
pub use timeout::timeout;
