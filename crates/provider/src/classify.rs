//! Provider response classification.
//!
//! Maps HTTP status, provider error codes, and transport failures onto the
//! Stratus taxonomy. The provider's own code always survives into the
//! error so executors can match named conditions instead of parsing
//! messages.

use stratus_error::StratusError;

/// Error codes that signal throttling or other retry-worthy conditions
/// regardless of HTTP status.
const TRANSIENT_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "ThrottledException",
    "RequestThrottled",
    "RequestThrottledException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "ProvisionedThroughputExceededException",
    "LimitExceededException",
    "ServiceUnavailable",
    "ServiceUnavailableException",
    "InternalFailure",
    "InternalServerError",
    "RequestTimeout",
    "RequestTimeoutException",
];

/// Codes a provider uses for "this resource already exists".
const ALREADY_EXISTS_CODES: &[&str] = &[
    "QueueNameExists",
    "QueueAlreadyExists",
    "ResourceInUseException",
];

/// Codes a provider uses for "no such resource".
const NOT_FOUND_CODES: &[&str] = &[
    "QueueDoesNotExist",
    "NonExistentQueue",
    "AWS.SimpleQueueService.NonExistentQueue",
    "ResourceNotFoundException",
];

/// Classify a provider error response body/status pair.
///
/// `operation` and `resource` flow into the error for diagnosis.
pub(crate) fn classify_response(
    operation: &str,
    resource: &str,
    status: http::StatusCode,
    code: &str,
    message: &str,
) -> StratusError {
    let transient = status.is_server_error()
        || status == http::StatusCode::TOO_MANY_REQUESTS
        || is_transient_code(code);

    if transient {
        StratusError::transient_provider(operation, resource, code, message)
    } else {
        StratusError::permanent_provider(operation, resource, code, message)
    }
}

/// Classify a transport-level failure from the HTTP client.
pub(crate) fn classify_transport(
    operation: &str,
    resource: &str,
    error: &reqwest::Error,
) -> StratusError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        StratusError::transient_provider(
            operation,
            resource,
            "TransportError",
            error.to_string(),
        )
    } else {
        StratusError::permanent_provider(operation, resource, "TransportError", error.to_string())
    }
}

/// Extract the bare code from a `__type` value such as
/// `com.amazonaws.sqs#QueueNameExists`.
pub(crate) fn error_code_from_type(raw: &str) -> &str {
    raw.rsplit('#').next().unwrap_or(raw)
}

fn is_transient_code(code: &str) -> bool {
    TRANSIENT_CODES.contains(&code)
}

/// Whether `error` is a provider "already exists" condition.
pub fn is_already_exists(error: &StratusError) -> bool {
    error
        .provider_code()
        .is_some_and(|code| ALREADY_EXISTS_CODES.contains(&code))
}

/// Whether `error` is a provider "no such resource" condition.
pub fn is_not_found(error: &StratusError) -> bool {
    error
        .provider_code()
        .is_some_and(|code| NOT_FOUND_CODES.contains(&code))
}
