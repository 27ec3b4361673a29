//! Passthrough credentials and the self-redacting string that holds them.

use std::fmt;

/// A string that redacts its contents in Debug and Display.
///
/// Used for secret material to prevent accidental logging.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Access the underlying value.
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Ambient credentials passed through to the provider, unmodified.
///
/// The runtime performs no credential acquisition or refresh; it signs
/// requests with whatever the environment supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The access key identifier (not secret; appears in signatures).
    pub access_key_id: String,
    /// The signing secret.
    pub secret_access_key: SecureString,
    /// Session token for temporary credentials, when present.
    pub session_token: Option<SecureString>,
}

impl Credentials {
    /// Construct credentials from their parts.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecureString::new(secret_access_key),
            session_token: session_token.map(SecureString::new),
        }
    }

    /// Placeholder credentials synthesized for emulator runs.
    ///
    /// Emulators accept any signature; a stable placeholder keeps request
    /// signing code on one path.
    pub fn emulator_placeholder() -> Self {
        Self::new("stratus-emulator", "stratus-emulator", None)
    }
}
