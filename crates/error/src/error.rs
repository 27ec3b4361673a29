//! Core error type for Stratus.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::context::ErrorContext;

/// Main error type for all Stratus operations.
///
/// Carries the taxonomy kind plus everything a caller needs to diagnose a
/// failed invocation without re-running it: a stable machine-readable code,
/// the provider's own error code where one exists, and optional context.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub struct StratusError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Additional context information.
    pub context: Option<ErrorContext>,
    /// Whether this error is retryable.
    pub retryable: bool,
    /// Suggested retry delay, when the provider supplied one.
    pub retry_after: Option<Duration>,
    /// Stable code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Technical details for debugging.
    pub details: Option<String>,
}

impl StratusError {
    /// A declared input failed validation. Never retried; raised before any
    /// network call.
    pub fn validation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        let field = field.into();
        let constraint = constraint.into();
        Self {
            kind: ErrorKind::Validation {
                field: field.clone(),
                constraint: constraint.clone(),
            },
            context: None,
            retryable: false,
            retry_after: None,
            code: "VALIDATION_ERROR".to_string(),
            message: format!("input `{field}`: {constraint}"),
            details: None,
        }
    }

    /// Required configuration is absent or unusable. Never retried.
    pub fn configuration(variable: impl Into<String>, message: impl Into<String>) -> Self {
        let variable = variable.into();
        let message = message.into();
        Self {
            kind: ErrorKind::Configuration {
                variable: variable.clone(),
                message: message.clone(),
            },
            context: None,
            retryable: false,
            retry_after: None,
            code: "CONFIGURATION_ERROR".to_string(),
            message: format!("configuration `{variable}`: {message}"),
            details: None,
        }
    }

    /// The provider failed in a way expected to succeed on retry
    /// (timeout, throttling, 5xx-equivalent).
    pub fn transient_provider(
        operation: impl Into<String>,
        resource: impl Into<String>,
        provider_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let operation = operation.into();
        let resource = resource.into();
        let provider_code = provider_code.into();
        let message = message.into();
        Self {
            kind: ErrorKind::TransientProvider {
                operation: operation.clone(),
                resource: resource.clone(),
                provider_code: provider_code.clone(),
            },
            context: None,
            retryable: true,
            retry_after: None,
            code: "TRANSIENT_PROVIDER_ERROR".to_string(),
            message: format!("{operation} `{resource}`: {message} ({provider_code})"),
            details: None,
        }
    }

    /// The provider rejected the request permanently (authorization, quota,
    /// malformed request). Surfaced immediately, never retried.
    pub fn permanent_provider(
        operation: impl Into<String>,
        resource: impl Into<String>,
        provider_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let operation = operation.into();
        let resource = resource.into();
        let provider_code = provider_code.into();
        let message = message.into();
        Self {
            kind: ErrorKind::PermanentProvider {
                operation: operation.clone(),
                resource: resource.clone(),
                provider_code: provider_code.clone(),
            },
            context: None,
            retryable: false,
            retry_after: None,
            code: "PERMANENT_PROVIDER_ERROR".to_string(),
            message: format!("{operation} `{resource}`: {message} ({provider_code})"),
            details: None,
        }
    }

    /// The operation exceeded a caller-imposed deadline.
    pub fn timeout(operation: impl Into<String>, elapsed: Duration) -> Self {
        let operation = operation.into();
        Self {
            kind: ErrorKind::Timeout {
                operation: operation.clone(),
                elapsed,
            },
            context: None,
            retryable: true,
            retry_after: None,
            code: "TIMEOUT_ERROR".to_string(),
            message: format!("operation `{operation}` timed out after {elapsed:?}"),
            details: None,
        }
    }

    /// The invocation was cancelled by the caller.
    pub fn cancelled() -> Self {
        Self {
            kind: ErrorKind::Cancelled,
            context: None,
            retryable: false,
            retry_after: None,
            code: "CANCELLED".to_string(),
            message: "invocation cancelled".to_string(),
            details: None,
        }
    }

    /// A runtime defect (broken invariant), not a user or provider failure.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::Internal {
                message: message.clone(),
            },
            context: None,
            retryable: false,
            retry_after: None,
            code: "INTERNAL_ERROR".to_string(),
            message,
            details: None,
        }
    }

    /// Attach context to the error.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attach technical details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach the provider's suggested retry delay.
    pub fn with_retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = Some(delay);
        self
    }

    /// Whether a retry loop may re-attempt after this error.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Whether the error occurred before any network activity.
    pub fn is_pre_network(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Validation { .. } | ErrorKind::Configuration { .. }
        )
    }

    /// The provider's own error code, when the provider produced one.
    pub fn provider_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::TransientProvider { provider_code, .. }
            | ErrorKind::PermanentProvider { provider_code, .. } => Some(provider_code),
            _ => None,
        }
    }

    /// The suggested retry delay, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }
}

impl fmt::Display for StratusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " (while {context})")?;
        }
        if let Some(details) = &self.details {
            write!(f, " - {details}")?;
        }
        if self.retryable {
            write!(f, " [retryable]")?;
        }
        Ok(())
    }
}

/// The error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A declared input is missing or violates its constraint.
    #[error("validation failed: input `{field}` {constraint}")]
    Validation {
        /// The offending input name.
        field: String,
        /// The violated constraint, in human terms.
        constraint: String,
    },

    /// Required configuration is absent or unusable.
    #[error("configuration `{variable}`: {message}")]
    Configuration {
        /// The environment variable (or setting) at fault.
        variable: String,
        /// What is wrong with it.
        message: String,
    },

    /// Provider failure expected to succeed on retry.
    #[error("transient provider failure during {operation} of `{resource}` ({provider_code})")]
    TransientProvider {
        /// The lifecycle operation being performed.
        operation: String,
        /// The resource name or identifier involved.
        resource: String,
        /// The provider's error code (empty for transport-level failures).
        provider_code: String,
    },

    /// Provider rejection that will not succeed on retry.
    #[error("permanent provider failure during {operation} of `{resource}` ({provider_code})")]
    PermanentProvider {
        /// The lifecycle operation being performed.
        operation: String,
        /// The resource name or identifier involved.
        resource: String,
        /// The provider's error code.
        provider_code: String,
    },

    /// A caller-imposed deadline elapsed.
    #[error("operation `{operation}` timed out after {elapsed:?}")]
    Timeout {
        /// The operation that was cut short.
        operation: String,
        /// How long it ran before the deadline.
        elapsed: Duration,
    },

    /// The caller aborted the invocation.
    #[error("cancelled")]
    Cancelled,

    /// A runtime defect.
    #[error("internal error: {message}")]
    Internal {
        /// What broke.
        message: String,
    },
}

/// Result type for Stratus operations.
pub type Result<T> = std::result::Result<T, StratusError>;

/// Extension trait for adding context to results.
pub trait ResultExt<T> {
    /// Attach a context description to the error, if any.
    fn context(self, description: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<StratusError>,
{
    fn context(self, description: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: StratusError = e.into();
            let context = ErrorContext::new(description);
            err.with_context(context)
        })
    }
}
