//! Shared-secret storage.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{BridgeError, Result};

/// HMAC secret held as raw bytes.
///
/// The buffer is wiped when the value is dropped and never appears in `Debug`
/// output, so secrets cannot leak through `tracing` fields or panic messages.
///
/// # Examples
///
/// ```
/// use infini_mcp_bridge::signing::SecretKey;
///
/// let secret = SecretKey::new("s3cr3t").unwrap();
/// assert_eq!(secret.expose(), b"s3cr3t");
/// assert_eq!(format!("{secret:?}"), "SecretKey([REDACTED])");
///
/// assert!(SecretKey::new("").is_err());
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wraps `bytes` as a secret.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(BridgeError::InvalidInput("secret must not be empty".to_owned()));
        }
        Ok(Self(bytes))
    }

    /// Borrows the raw secret bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Length of the secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; empty secrets are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl FromStr for SecretKey {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.as_bytes())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut raw = String::deserialize(deserializer)?;
        let secret = Self::new(raw.as_bytes()).map_err(serde::de::Error::custom);
        raw.zeroize();
        secret
    }
}
