//! Canonicalization helpers shared by the request signer and the webhook verifier.
//!
//! Everything here is a pure function of its inputs. Dates are rendered in GMT
//! regardless of the host timezone, digests are taken over the exact bytes
//! supplied, and base64 uses the standard alphabet without line wrapping.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::{
    error::{BridgeError, Result},
    signing::SecretKey,
};

type HmacSha256 = Hmac<Sha256>;

/// RFC 1123 date layout with a literal `GMT` zone.
///
/// `chrono` renders `%a` and `%b` with fixed English names, so the output does not
/// depend on the process locale.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Source of the current time used for the `Date` header.
///
/// Production code uses [`SystemClock`]; tests inject a [`FixedClock`] so that
/// signatures are reproducible.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use infini_mcp_bridge::signing::{Clock, FixedClock};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always returns `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Renders `instant` as an RFC 1123 GMT date with second resolution.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use infini_mcp_bridge::signing::format_date;
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_date(instant), "Mon, 01 Jan 2024 00:00:00 GMT");
/// ```
#[must_use]
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format(HTTP_DATE_FORMAT).to_string()
}

/// Computes the `Digest` value for a request body: `SHA-256={base64}`.
///
/// The hash covers the exact bytes given. An empty body still yields the digest of
/// zero bytes; whether a digest is sent at all is the caller's decision.
///
/// # Examples
///
/// ```
/// use infini_mcp_bridge::signing::digest_body;
///
/// assert_eq!(digest_body(b""), "SHA-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
/// ```
#[must_use]
pub fn digest_body(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("SHA-256={}", encode_base64(hash))
}

/// Standard base64 without line wrapping.
#[must_use]
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Inverse of [`encode_base64`].
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `encoded` is not valid standard base64.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| BridgeError::InvalidInput(format!("invalid base64: {e}")))
}

/// Computes `base64(HMAC_SHA256(secret, message))`.
///
/// # Errors
///
/// Returns [`BridgeError::EncodingError`] if the MAC cannot be keyed. HMAC accepts
/// keys of any length, so this only happens if the primitive itself is broken.
pub(crate) fn hmac_sha256_base64(secret: &SecretKey, message: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.expose())
        .map_err(|e| BridgeError::EncodingError(format!("HMAC key rejected: {e}")))?;
    mac.update(message);
    Ok(encode_base64(mac.finalize().into_bytes()))
}

/// Compares two byte strings without leaking the position of the first difference.
///
/// A length mismatch returns `false` immediately; lengths are not secret here.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
