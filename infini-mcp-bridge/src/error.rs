//! Error types for the Infini MCP bridge.
//!
//! This module defines all error types that can occur while signing requests,
//! verifying webhooks, and talking to the Infini API.
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Caller Errors** ([`BridgeError::InvalidInput`]): malformed method, empty path,
//!   malformed timestamp, empty secret. Never retried.
//! - **Invariant Violations** ([`BridgeError::EncodingError`]): digest or HMAC computation
//!   failed over well-formed bytes. Surfaced, never swallowed.
//! - **Network Errors** ([`BridgeError::HttpError`], [`BridgeError::TransportError`])
//! - **Provider Errors** ([`BridgeError::ApiStatus`], [`BridgeError::ApiError`])
//! - **Configuration Errors** ([`BridgeError::ConfigError`])
//!
//! A webhook signature mismatch is *not* an error: verification returns `Ok(false)`.
//!
//! # Examples
//!
//! ```
//! use infini_mcp_bridge::error::{BridgeError, Result};
//!
//! fn require_path(path: &str) -> Result<&str> {
//!     if path.is_empty() {
//!         return Err(BridgeError::InvalidInput("path must not be empty".to_owned()));
//!     }
//!     Ok(path)
//! }
//!
//! assert!(require_path("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for bridge operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in the Infini MCP bridge.
///
/// # Error Recovery
///
/// - **Transient errors** ([`HttpError`](Self::HttpError)): the caller may retry; the bridge never
///   retries on its own
/// - **Caller errors** ([`InvalidInput`](Self::InvalidInput)): fix input, do not retry as-is
/// - **Provider errors** ([`ApiStatus`](Self::ApiStatus)): inspect `detail` for the provider's
///   reason
/// - **Configuration errors** ([`ConfigError`](Self::ConfigError)): set the missing credentials
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Caller supplied malformed input.
    ///
    /// Raised for an unrecognized HTTP method, an empty path, a malformed webhook
    /// timestamp, an empty secret, or a missing required tool parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use infini_mcp_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::InvalidInput("unsupported HTTP method: BREW".to_owned());
    /// assert_eq!(err.to_string(), "Invalid input: unsupported HTTP method: BREW");
    /// ```
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Digest or HMAC computation failed over well-formed bytes.
    ///
    /// This is an internal invariant violation. It is surfaced to the caller and
    /// never replaced with a best-guess signature.
    #[error("Encoding failed: {0}")]
    EncodingError(String),

    /// HTTP request failed.
    ///
    /// This error wraps [`reqwest::Error`] and occurs when network communication with
    /// the Infini API fails (timeouts, connection refused, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The Infini API answered with a non-success status code.
    #[error("HTTP Error: {status}")]
    ApiStatus {
        /// HTTP status code returned by the API.
        status: u16,
        /// Raw response body, kept for diagnostics.
        detail: String,
    },

    /// The Infini API answered with a body that could not be parsed.
    #[error("Invalid API response: {0}")]
    ApiError(String),

    /// Configuration is missing or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use infini_mcp_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::ConfigError("API credentials not configured".to_owned());
    /// assert!(err.to_string().contains("credentials"));
    /// ```
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Transport rejected the request before sending it.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Request payload could not be serialized.
    #[error("Serialization failed: {0}")]
    SerializationError(String),
}
