//! Error taxonomy for the Stratus runtime.
//!
//! One shared error type across all crates. The taxonomy exists so callers
//! can make exactly two decisions mechanically: *is this retryable* and
//! *did the invocation fail before any network activity*. Everything else
//! (operation, resource, provider error code) is carried as context for
//! diagnosis without re-running.
//!
//! - [`ErrorKind::Validation`] — bad input, rejected before any side effect
//! - [`ErrorKind::Configuration`] — missing credentials/endpoint, fail-fast
//! - [`ErrorKind::TransientProvider`] — retried per policy
//! - [`ErrorKind::PermanentProvider`] — authorization, quota, malformed
//!   request; surfaced immediately
//! - [`ErrorKind::Timeout`] — deadline or cancellation driven
//! - [`ErrorKind::Cancelled`] — caller abort
//! - [`ErrorKind::Internal`] — runtime defects

#![warn(missing_docs)]

mod context;
mod error;

pub use context::ErrorContext;
pub use error::{ErrorKind, Result, ResultExt, StratusError};
