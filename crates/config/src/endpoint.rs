//! Endpoint resolution.

use stratus_error::{Result, StratusError};
use url::Url;

use crate::credentials::Credentials;
use crate::env::Environment;
use crate::{
    ACCESS_KEY_ID_VAR, ENDPOINT_URL_FALLBACK_VAR, ENDPOINT_URL_VAR, REGION_FALLBACK_VAR,
    REGION_VAR, SECRET_ACCESS_KEY_VAR, SESSION_TOKEN_VAR,
};

const DEFAULT_REGION: &str = "us-east-1";

/// Whether calls go to the real service or a local emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointMode {
    /// Standard per-service production endpoints.
    Production,
    /// Every call routed to one override base URL.
    Emulator {
        /// The override base, e.g. `http://localhost:4566`.
        base: Url,
    },
}

/// Resolved target for an invocation's single outbound call.
///
/// Derived once from the [`Environment`] snapshot and immutable afterwards.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Production or emulator routing.
    pub mode: EndpointMode,
    /// Signing region.
    pub region: String,
    /// Passthrough (or placeholder) credentials.
    pub credentials: Credentials,
}

impl EndpointConfig {
    /// Resolve endpoint configuration from the environment.
    ///
    /// With the override variable set, all calls route to the override host
    /// and placeholder credentials stand in when none are supplied
    /// (emulators do not verify signatures). Without an override, credentials
    /// are required and their absence is a `ConfigurationError` naming the
    /// first missing variable.
    pub fn resolve(env: &Environment) -> Result<Self> {
        let region = env
            .first_of(&[REGION_VAR, REGION_FALLBACK_VAR])
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        if let Some(raw) = env.first_of(&[ENDPOINT_URL_VAR, ENDPOINT_URL_FALLBACK_VAR]) {
            let base = Url::parse(raw).map_err(|e| {
                StratusError::configuration(
                    ENDPOINT_URL_VAR,
                    format!("`{raw}` is not a valid URL: {e}"),
                )
            })?;
            let credentials = match env.get(ACCESS_KEY_ID_VAR) {
                Some(key) => Credentials::new(
                    key,
                    env.get(SECRET_ACCESS_KEY_VAR).unwrap_or_default(),
                    env.get(SESSION_TOKEN_VAR).map(str::to_string),
                ),
                None => Credentials::emulator_placeholder(),
            };
            return Ok(Self {
                mode: EndpointMode::Emulator { base },
                region,
                credentials,
            });
        }

        let access_key_id = env.get(ACCESS_KEY_ID_VAR).ok_or_else(|| {
            StratusError::configuration(ACCESS_KEY_ID_VAR, "not set and no endpoint override given")
        })?;
        let secret_access_key = env.get(SECRET_ACCESS_KEY_VAR).ok_or_else(|| {
            StratusError::configuration(
                SECRET_ACCESS_KEY_VAR,
                "not set and no endpoint override given",
            )
        })?;

        Ok(Self {
            mode: EndpointMode::Production,
            region,
            credentials: Credentials::new(
                access_key_id,
                secret_access_key,
                env.get(SESSION_TOKEN_VAR).map(str::to_string),
            ),
        })
    }

    /// The base URL for `service` (e.g. `"sqs"`, `"dynamodb"`).
    pub fn service_url(&self, service: &str) -> Result<Url> {
        match &self.mode {
            EndpointMode::Emulator { base } => Ok(base.clone()),
            EndpointMode::Production => {
                let rendered = format!("https://{service}.{}.amazonaws.com/", self.region);
                Url::parse(&rendered).map_err(|e| {
                    StratusError::configuration(
                        REGION_VAR,
                        format!("region `{}` produces an invalid endpoint: {e}", self.region),
                    )
                })
            }
        }
    }

    /// Whether TLS certificate verification is relaxed.
    ///
    /// True only under an emulator override, which typically serves
    /// self-signed certificates or plain HTTP.
    pub fn allow_invalid_certs(&self) -> bool {
        matches!(self.mode, EndpointMode::Emulator { .. })
    }

    /// Whether an endpoint override is in effect.
    pub fn is_emulator(&self) -> bool {
        matches!(self.mode, EndpointMode::Emulator { .. })
    }
}
