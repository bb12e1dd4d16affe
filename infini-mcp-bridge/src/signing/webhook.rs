//! Inbound webhook signature verification.
//!
//! Infini signs each callback with `base64(HMAC_SHA256(webhook_secret, payload))`
//! where the payload is the timestamp immediately followed by the raw request
//! body. The joining rule lives in [`webhook_signing_payload`] and nowhere else.

use tracing::{debug, instrument, warn};

use crate::{
    error::{BridgeError, Result},
    signing::{
        SecretKey,
        canonical::{constant_time_eq, hmac_sha256_base64},
    },
};

/// Bytes inserted between the timestamp and the body. Infini uses none.
pub const WEBHOOK_TIMESTAMP_SEPARATOR: &[u8] = b"";

/// Builds the byte string a webhook signature covers.
///
/// # Examples
///
/// ```
/// use infini_mcp_bridge::signing::webhook_signing_payload;
///
/// let payload = webhook_signing_payload("1700000000", br#"{"order_id":"abc"}"#);
/// assert_eq!(payload, br#"1700000000{"order_id":"abc"}"#);
/// ```
#[must_use]
pub fn webhook_signing_payload(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut payload =
        Vec::with_capacity(timestamp.len() + WEBHOOK_TIMESTAMP_SEPARATOR.len() + body.len());
    payload.extend_from_slice(timestamp.as_bytes());
    payload.extend_from_slice(WEBHOOK_TIMESTAMP_SEPARATOR);
    payload.extend_from_slice(body);
    payload
}

/// One inbound callback to verify.
///
/// `raw_body` must be the exact bytes received, before any JSON parsing.
#[derive(Debug, Clone, Copy)]
pub struct WebhookVerificationRequest<'a> {
    /// Request body exactly as received.
    pub raw_body: &'a [u8],
    /// Timestamp delivered with the callback (unix seconds or milliseconds).
    pub timestamp: &'a str,
    /// Base64 signature delivered with the callback.
    pub provided_signature: &'a str,
    /// Webhook secret to verify against.
    pub secret: &'a SecretKey,
}

impl WebhookVerificationRequest<'_> {
    /// Recomputes the expected signature and compares it in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the timestamp is malformed, and
    /// [`BridgeError::EncodingError`] if the HMAC cannot be computed. A signature
    /// mismatch is `Ok(false)`, never an error.
    #[instrument(skip_all, fields(body_len = self.raw_body.len(), timestamp = self.timestamp))]
    pub fn verify(&self) -> Result<bool> {
        let expected = expected_signature(self.secret, self.timestamp, self.raw_body)?;
        let matched = constant_time_eq(expected.as_bytes(), self.provided_signature.as_bytes());

        if matched {
            debug!("webhook signature verified");
        } else {
            warn!("webhook signature mismatch");
        }
        Ok(matched)
    }
}

/// Verifies webhook callbacks against a configured secret.
///
/// # Examples
///
/// ```
/// use infini_mcp_bridge::signing::{SecretKey, WebhookVerifier};
///
/// # fn example() -> infini_mcp_bridge::error::Result<()> {
/// let verifier = WebhookVerifier::new(SecretKey::new("whsec123")?);
/// let body = br#"{"order_id":"abc"}"#;
///
/// let signature = verifier.sign("1700000000", body)?;
/// assert!(verifier.verify(body, "1700000000", &signature)?);
/// assert!(!verifier.verify(body, "1700000001", &signature)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: SecretKey,
}

impl WebhookVerifier {
    /// Creates a verifier for `secret`.
    #[must_use]
    pub const fn new(secret: SecretKey) -> Self {
        Self { secret }
    }

    /// Checks `signature` against `body` and `timestamp`.
    ///
    /// # Errors
    ///
    /// See [`WebhookVerificationRequest::verify`].
    pub fn verify(&self, body: &[u8], timestamp: &str, signature: &str) -> Result<bool> {
        WebhookVerificationRequest {
            raw_body: body,
            timestamp,
            provided_signature: signature,
            secret: &self.secret,
        }
        .verify()
    }

    /// Computes the signature Infini would send for `body` at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the timestamp is malformed.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String> {
        expected_signature(&self.secret, timestamp, body)
    }
}

fn expected_signature(secret: &SecretKey, timestamp: &str, body: &[u8]) -> Result<String> {
    // `SecretKey` cannot be built empty, but a zeroized one can reach here.
    if secret.is_empty() {
        return Err(BridgeError::InvalidInput("webhook secret must not be empty".to_owned()));
    }
    validate_timestamp(timestamp)?;
    hmac_sha256_base64(secret, &webhook_signing_payload(timestamp, body))
}

/// Accepts a non-empty run of ASCII digits.
fn validate_timestamp(timestamp: &str) -> Result<()> {
    if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BridgeError::InvalidInput(format!(
            "malformed webhook timestamp: {timestamp:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"order_id":"abc"}"#;
    const TIMESTAMP: &str = "1700000000";
    const EXPECTED: &str = "jC53y1G0GGatJ0fyp8iKe4DDLihQDyOyTKILdGAYnVo=";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SecretKey::new("whsec123").unwrap())
    }

    #[test]
    fn test_webhook_signature_fixture() {
        assert_eq!(verifier().sign(TIMESTAMP, BODY).unwrap(), EXPECTED);
    }

    #[test]
    fn test_verify_valid_signature() {
        assert!(verifier().verify(BODY, TIMESTAMP, EXPECTED).unwrap());
    }

    #[test]
    fn test_verify_other_string_fails() {
        let verifier = verifier();
        assert!(!verifier.verify(BODY, TIMESTAMP, "").unwrap());
        assert!(!verifier.verify(BODY, TIMESTAMP, "not-a-signature").unwrap());
        assert!(!verifier.verify(BODY, TIMESTAMP, &EXPECTED.to_lowercase()).unwrap());
        assert!(!verifier.verify(BODY, TIMESTAMP, &format!("{EXPECTED}=")).unwrap());
    }

    #[test]
    fn test_verify_tampered_body_fails() {
        let tampered = br#"{"order_id":"abd"}"#;
        assert!(!verifier().verify(tampered, TIMESTAMP, EXPECTED).unwrap());
    }

    #[test]
    fn test_verify_tampered_timestamp_fails() {
        assert!(!verifier().verify(BODY, "1700000001", EXPECTED).unwrap());
    }

    #[test]
    fn test_verify_wrong_secret_fails() {
        let other = WebhookVerifier::new(SecretKey::new("whsec124").unwrap());
        assert!(!other.verify(BODY, TIMESTAMP, EXPECTED).unwrap());
    }

    #[test]
    fn test_verify_request_struct() {
        let secret = SecretKey::new("whsec123").unwrap();
        let request = WebhookVerificationRequest {
            raw_body: BODY,
            timestamp: TIMESTAMP,
            provided_signature: EXPECTED,
            secret: &secret,
        };
        assert!(request.verify().unwrap());
    }

    #[test]
    fn test_malformed_timestamp_is_error() {
        let verifier = verifier();
        for timestamp in ["", "17000a0000", "-1700000000", " 1700000000", "2024-01-01T00:00:00Z"] {
            let result = verifier.verify(BODY, timestamp, EXPECTED);
            assert!(
                matches!(result, Err(BridgeError::InvalidInput(_))),
                "timestamp {timestamp:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_millisecond_timestamp_accepted() {
        let verifier = verifier();
        let signature = verifier.sign("1700000000000", BODY).unwrap();
        assert!(verifier.verify(BODY, "1700000000000", &signature).unwrap());
    }

    #[test]
    fn test_signing_payload_joins_without_separator() {
        assert_eq!(webhook_signing_payload("1", b"{}"), b"1{}");
        assert_eq!(webhook_signing_payload("1", b""), b"1");
    }

    #[test]
    fn test_empty_body_verifies() {
        let verifier = verifier();
        let signature = verifier.sign(TIMESTAMP, b"").unwrap();
        assert!(verifier.verify(b"", TIMESTAMP, &signature).unwrap());
    }
}
