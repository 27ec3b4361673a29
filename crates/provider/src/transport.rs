//! Signed HTTP transport for the target-header JSON dialect.

use chrono::Utc;
use stratus_config::EndpointConfig;
use stratus_error::{Result, StratusError};
use tracing::debug;

use crate::classify::{classify_response, classify_transport, error_code_from_type};
use crate::sign::{sign, SigningRequest};

const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// One provider call: which service, which operation target, and the
/// context that flows into errors.
#[derive(Debug, Clone, Copy)]
pub struct CallSpec {
    /// Signing service name, e.g. `"sqs"`.
    pub service: &'static str,
    /// `X-Amz-Target` value, e.g. `"AmazonSQS.CreateQueue"`.
    pub target: &'static str,
    /// Lifecycle operation name for error context, e.g. `"create"`.
    pub operation: &'static str,
}

/// Signed JSON-dialect HTTP transport.
///
/// Owns its `reqwest::Client`, constructed from the resolved
/// [`EndpointConfig`]; no process-wide client singletons. Cloning shares
/// the connection pool, which is the client's own sharing model.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    endpoint: EndpointConfig,
}

impl Transport {
    /// Build a transport for the resolved endpoint.
    ///
    /// Under an emulator override, TLS certificate verification is relaxed
    /// to match how emulators serve self-signed certificates.
    pub fn new(endpoint: EndpointConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(endpoint.allow_invalid_certs())
            .build()
            .map_err(|e| {
                StratusError::configuration("http-client", format!("failed to construct: {e}"))
            })?;
        Ok(Self { http, endpoint })
    }

    /// The endpoint this transport routes to.
    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Perform one signed call and decode the JSON response.
    ///
    /// `resource` names the resource being operated on, for error context.
    /// Error responses are classified into the taxonomy with the
    /// provider's code preserved.
    pub async fn call(
        &self,
        spec: CallSpec,
        resource: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint.service_url(spec.service)?;
        let host = url
            .host_str()
            .map(|h| match url.port() {
                Some(port) => format!("{h}:{port}"),
                None => h.to_string(),
            })
            .ok_or_else(|| {
                StratusError::configuration(
                    "endpoint",
                    format!("endpoint `{url}` has no host component"),
                )
            })?;

        let payload = serde_json::to_vec(body).map_err(|e| {
            StratusError::internal(format!("failed to encode request body: {e}"))
        })?;

        let signed = sign(
            &SigningRequest {
                host: &host,
                service: spec.service,
                region: &self.endpoint.region,
                target: spec.target,
                content_type: CONTENT_TYPE,
                body: &payload,
            },
            &self.endpoint.credentials,
            Utc::now(),
        )?;

        debug!(
            target_header = spec.target,
            %url,
            resource,
            "dispatching provider call"
        );

        let mut request = self
            .http
            .post(url)
            .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", spec.target)
            .header("X-Amz-Date", &signed.amz_date)
            .header(http::header::AUTHORIZATION, &signed.authorization)
            .body(payload);
        if let Some(token) = &signed.security_token {
            request = request.header("X-Amz-Security-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(spec.operation, resource, &e))?;

        let status = http::StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        let header_code = response
            .headers()
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(|v| error_code_from_type(v.trim_end_matches(':')).to_string());

        let text = response
            .text()
            .await
            .map_err(|e| classify_transport(spec.operation, resource, &e))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(serde_json::Value::Object(serde_json::Map::new()));
            }
            return serde_json::from_str(&text).map_err(|e| {
                StratusError::permanent_provider(
                    spec.operation,
                    resource,
                    "MalformedResponse",
                    format!("provider returned undecodable JSON: {e}"),
                )
            });
        }

        let (body_code, message) = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(parsed) => {
                let code = parsed
                    .get("__type")
                    .and_then(serde_json::Value::as_str)
                    .map(|t| error_code_from_type(t).to_string());
                let message = parsed
                    .get("message")
                    .or_else(|| parsed.get("Message"))
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or(&text)
                    .to_string();
                (code, message)
            }
            Err(_) => (None, text.clone()),
        };

        let code = body_code.or(header_code).unwrap_or_default();
        Err(classify_response(
            spec.operation,
            resource,
            status,
            &code,
            &message,
        ))
    }
}
