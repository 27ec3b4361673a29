//! SigV4 request signing.
//!
//! Implements the canonical-request / string-to-sign / derived-key chain
//! for the POST-to-`/` shape this transport uses. Only the headers the
//! dialect sends are signed; there is no query string and the payload is
//! always present.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use stratus_config::Credentials;
use stratus_error::{Result, StratusError};

type HmacSha256 = Hmac<Sha256>;

/// Headers produced by signing, to be attached to the outgoing request.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    /// `Authorization` header value.
    pub authorization: String,
    /// `X-Amz-Date` header value.
    pub amz_date: String,
    /// `X-Amz-Security-Token` header value, for temporary credentials.
    pub security_token: Option<String>,
}

/// Inputs the signature covers.
#[derive(Debug)]
pub struct SigningRequest<'a> {
    /// Lowercase `Host` header value.
    pub host: &'a str,
    /// Signing service name (e.g. `sqs`).
    pub service: &'a str,
    /// Signing region.
    pub region: &'a str,
    /// `X-Amz-Target` header value.
    pub target: &'a str,
    /// Request content type.
    pub content_type: &'a str,
    /// Request body bytes.
    pub body: &'a [u8],
}

/// Sign `request` with `credentials` at `now`.
pub fn sign(
    request: &SigningRequest<'_>,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<SignedHeaders> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let scope = format!("{date}/{}/{}/aws4_request", request.region, request.service);

    let token = credentials.session_token.as_ref().map(|t| t.expose().to_string());

    // Canonical headers, sorted by name; the token is signed when present.
    let mut headers: Vec<(&str, &str)> = vec![
        ("content-type", request.content_type),
        ("host", request.host),
        ("x-amz-date", &amz_date),
        ("x-amz-target", request.target),
    ];
    if let Some(token) = token.as_deref() {
        headers.push(("x-amz-security-token", token));
    }
    headers.sort_by_key(|(name, _)| *name);

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect();
    let signed_header_names: Vec<&str> = headers.iter().map(|(name, _)| *name).collect();
    let signed_header_list = signed_header_names.join(";");

    let payload_hash = hex::encode(Sha256::digest(request.body));
    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{signed_header_list}\n{payload_hash}"
    );

    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let secret = format!("AWS4{}", credentials.secret_access_key.expose());
    let k_date = hmac_raw(secret.as_bytes(), date.as_bytes())?;
    let k_region = hmac_raw(&k_date, request.region.as_bytes())?;
    let k_service = hmac_raw(&k_region, request.service.as_bytes())?;
    let k_signing = hmac_raw(&k_service, b"aws4_request")?;
    let signature = hex::encode(hmac_raw(&k_signing, string_to_sign.as_bytes())?);

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={signed_header_list}, Signature={signature}",
        credentials.access_key_id
    );

    Ok(SignedHeaders {
        authorization,
        amz_date,
        security_token: token,
    })
}

fn hmac_raw(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| StratusError::internal(format!("HMAC key setup failed: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn request<'a>(body: &'a [u8], host: &'a str) -> SigningRequest<'a> {
        SigningRequest {
            host,
            service: "sqs",
            region: "us-east-1",
            target: "AmazonSQS.CreateQueue",
            content_type: "application/x-amz-json-1.0",
            body,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn signature_is_deterministic() {
        let creds = Credentials::new("AKIDEXAMPLE", "secret", None);
        let a = sign(&request(b"{}", "sqs.us-east-1.amazonaws.com"), &creds, at()).unwrap();
        let b = sign(&request(b"{}", "sqs.us-east-1.amazonaws.com"), &creds, at()).unwrap();
        assert_eq!(a.authorization, b.authorization);
        assert_eq!(a.amz_date, "20260115T123000Z");
    }

    #[test]
    fn authorization_carries_scope_and_signed_headers() {
        let creds = Credentials::new("AKIDEXAMPLE", "secret", None);
        let signed = sign(&request(b"{}", "localhost:4566"), &creds, at()).unwrap();
        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20260115/us-east-1/sqs/aws4_request"
        ));
        assert!(signed
            .authorization
            .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target"));
    }

    #[test]
    fn session_token_joins_the_signed_set() {
        let creds = Credentials::new("AKID", "secret", Some("the-token".into()));
        let signed = sign(&request(b"{}", "localhost:4566"), &creds, at()).unwrap();
        assert_eq!(signed.security_token.as_deref(), Some("the-token"));
        assert!(signed.authorization.contains("x-amz-security-token"));
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let a = sign(
            &request(b"{}", "h"),
            &Credentials::new("AKID", "one", None),
            at(),
        )
        .unwrap();
        let b = sign(
            &request(b"{}", "h"),
            &Credentials::new("AKID", "two", None),
            at(),
        )
        .unwrap();
        assert_ne!(a.authorization, b.authorization);
    }

    #[test]
    fn body_changes_the_signature() {
        let creds = Credentials::new("AKID", "secret", None);
        let a = sign(&request(b"{\"QueueName\":\"a\"}", "h"), &creds, at()).unwrap();
        let b = sign(&request(b"{\"QueueName\":\"b\"}", "h"), &creds, at()).unwrap();
        assert_ne!(a.authorization, b.authorization);
    }
}
