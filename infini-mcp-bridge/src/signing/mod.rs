//! Infini request authentication and webhook verification.
//!
//! Infini authenticates API calls with an HMAC-SHA256 signature over a
//! canonical, line-oriented description of the request, and signs webhook
//! callbacks with a separate secret over the timestamp and raw body.
//!
//! # Outbound Requests
//!
//! Each request carries:
//!
//! - **Date**: RFC 1123 GMT date, also part of the signed string
//! - **Authorization**: key id, algorithm label and base64 signature
//! - **Digest**: `SHA-256={base64}` of the body (body-bearing requests only)
//!
//! The signed string has three or four lines joined by `\n`:
//!
//! ```text
//! {keyId}
//! {METHOD} {path}
//! date: {date}
//! digest: SHA-256={base64}
//! ```
//!
//! # Inbound Webhooks
//!
//! The expected signature is `base64(HMAC_SHA256(webhook_secret, timestamp || body))`
//! and is compared against the provided one in constant time. A mismatch is a
//! normal `false`, not an error.
//!
//! # Examples
//!
//! ```rust
//! use infini_mcp_bridge::signing::{RequestSigner, SecretKey, WebhookVerifier};
//!
//! # fn example() -> infini_mcp_bridge::error::Result<()> {
//! let signer = RequestSigner::new("api-key-id", SecretKey::new("api-secret")?);
//! let headers = signer.sign("GET", "/order", None)?;
//! println!("Date: {}", headers.date);
//! println!("Authorization: {}", headers.authorization);
//!
//! let verifier = WebhookVerifier::new(SecretKey::new("webhook-secret")?);
//! let valid = verifier.verify(b"{}", "1700000000", "c2lnbmF0dXJl")?;
//! assert!(!valid);
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - Secrets live in [`SecretKey`], which zeroes its buffer on drop and redacts `Debug`
//! - Canonical strings and bodies are never logged; only their lengths are
//! - All operations are pure and share no state, so signers can be used from
//!   any number of tasks without locking

pub mod canonical;
pub mod secret;
pub mod signer;
pub mod webhook;


pub use canonical::{
    Clock, FixedClock, SystemClock, constant_time_eq, decode_base64, digest_body, encode_base64,
    format_date,
};
pub use secret::SecretKey;
pub use signer::{HttpMethod, RequestSigner, SignedHeaders, SigningContext};
pub use webhook::{
    WEBHOOK_TIMESTAMP_SEPARATOR, WebhookVerificationRequest, WebhookVerifier,
    webhook_signing_payload,
};

/// Scheme token opening the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "Signature";

/// Algorithm label in the `Authorization` header.
pub const SIGNATURE_ALGORITHM: &str = "hmac-sha256";

/// Value of the `headers` parameter in the `Authorization` header.
pub const SIGNED_HEADERS: &str = "@request-target date";
