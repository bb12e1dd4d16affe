//! Bridge configuration.
//!
//! Credentials and endpoint selection come either from the process environment
//! or from a TOML file. Missing credentials are not a load error: the bridge
//! starts, and each signed call fails with [`BridgeError::ConfigError`] until
//! they are supplied.
//!
//! # Environment Variables
//!
//! | Variable                | Meaning                                   | Default         |
//! |-------------------------|-------------------------------------------|-----------------|
//! | `INFINI_API_KEY`        | API key id                                | unset           |
//! | `INFINI_SECRET_KEY`     | API secret                                | unset           |
//! | `INFINI_WEBHOOK_SECRET` | Webhook secret                            | API secret      |
//! | `INFINI_ENV`            | `sandbox` or `production`                 | `sandbox`       |
//! | `INFINI_BASE_URL`       | Base URL override                         | per environment |
//!
//! # Examples
//!
//! ```
//! use infini_mcp_bridge::config::{Environment, InfiniConfig};
//!
//! let config = InfiniConfig::from_toml(
//!     r#"
//!     api_key = "k1"
//!     api_secret = "s3cr3t"
//!     environment = "production"
//!
//!     [http]
//!     timeout_secs = 15
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.environment, Environment::Production);
//! assert_eq!(config.base_url().unwrap().as_str(), "https://openapi.infini.money/");
//! assert!(config.request_signer().is_ok());
//! ```

use std::{fmt, path::Path, str::FromStr};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::{
    error::{BridgeError, Result},
    signing::{RequestSigner, SecretKey, WebhookVerifier},
    transport::HttpConfig,
};

/// Environment variable holding the API key id.
pub const ENV_API_KEY: &str = "INFINI_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_SECRET_KEY: &str = "INFINI_SECRET_KEY";
/// Environment variable holding the webhook secret.
pub const ENV_WEBHOOK_SECRET: &str = "INFINI_WEBHOOK_SECRET";
/// Environment variable selecting the environment.
pub const ENV_ENVIRONMENT: &str = "INFINI_ENV";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "INFINI_BASE_URL";

/// Message returned when API credentials are missing.
pub const MISSING_CREDENTIALS: &str = "API credentials not configured";
/// Message returned when no webhook secret can be resolved.
pub const MISSING_WEBHOOK_SECRET: &str = "No webhook secret available";

/// Infini deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test deployment; no real funds move.
    #[default]
    Sandbox,
    /// Live deployment.
    Production,
}

impl Environment {
    /// Base URL of the Infini open API for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://openapi-sandbox.infini.money",
            Self::Production => "https://openapi.infini.money",
        }
    }

    /// Lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }

    /// Parses an environment name, falling back to [`Environment::Sandbox`]
    /// with a warning for anything unrecognized.
    #[must_use]
    pub fn parse_or_sandbox(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!(value, "unknown Infini environment, falling back to sandbox");
            Self::Sandbox
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(BridgeError::ConfigError(format!("unknown environment: {other}"))),
        }
    }
}

/// Complete bridge configuration.
///
/// Several configurations (for example sandbox and production) can coexist
/// in one process; nothing here is global.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfiniConfig {
    /// API key id.
    pub api_key: Option<String>,
    /// API secret used to sign requests.
    pub api_secret: Option<SecretKey>,
    /// Webhook secret. Falls back to `api_secret` when unset.
    pub webhook_secret: Option<SecretKey>,
    /// Target environment.
    pub environment: Environment,
    /// Base URL override, mainly for staging proxies.
    pub base_url: Option<String>,
    /// HTTP transport settings.
    pub http: HttpConfig,
}

impl InfiniConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the resulting configuration is
    /// invalid (for example a non-HTTPS base URL override).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// See [`InfiniConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let secret = |name: &str| var(name).map(SecretKey::new).transpose();

        let config = Self {
            api_key: var(ENV_API_KEY),
            api_secret: secret(ENV_SECRET_KEY)?,
            webhook_secret: secret(ENV_WEBHOOK_SECRET)?,
            environment: var(ENV_ENVIRONMENT)
                .map_or_else(Environment::default, |value| Environment::parse_or_sandbox(&value)),
            base_url: var(ENV_BASE_URL),
            http: HttpConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the document does not parse or
    /// fails [`InfiniConfig::validate`].
    pub fn from_toml(document: &str) -> Result<Self> {
        let config: Self = toml::from_str(document)
            .map_err(|e| BridgeError::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the file cannot be read, or as
    /// for [`InfiniConfig::from_toml`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&document)
    }

    /// Checks the base URL and HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the base URL override is not an
    /// HTTPS URL, points at a loopback host, or the HTTP timeouts are out of range.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.api_key.is_some() != self.api_secret.is_some() {
            warn!("only one of api_key and api_secret is set; signed calls will fail");
        }
        if let Some(api_key) = &self.api_key
            && (api_key.contains(['\r', '\n', '"']))
        {
            return Err(BridgeError::ConfigError(
                "api_key must not contain line breaks or '\"'".to_owned(),
            ));
        }
        self.http.validate()
    }

    /// Resolved base URL: the override if set, else the environment default.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] for an unparseable, non-HTTPS or
    /// loopback URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.base_url.as_deref().unwrap_or_else(|| self.environment.base_url());
        parse_base_url(raw)
    }

    /// Returns `true` when both the API key and secret are set.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// Webhook secret after falling back to the API secret.
    #[must_use]
    pub fn resolved_webhook_secret(&self) -> Option<&SecretKey> {
        self.webhook_secret.as_ref().or(self.api_secret.as_ref())
    }

    /// Builds a request signer from the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] with [`MISSING_CREDENTIALS`] when
    /// the key id or secret is absent.
    pub fn request_signer(&self) -> Result<RequestSigner> {
        match (&self.api_key, &self.api_secret) {
            (Some(key_id), Some(secret)) => Ok(RequestSigner::new(key_id.clone(), secret.clone())),
            _ => Err(BridgeError::ConfigError(MISSING_CREDENTIALS.to_owned())),
        }
    }

    /// Builds a webhook verifier from the resolved webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] with [`MISSING_WEBHOOK_SECRET`]
    /// when neither a webhook secret nor an API secret is configured.
    pub fn webhook_verifier(&self) -> Result<WebhookVerifier> {
        self.resolved_webhook_secret()
            .cloned()
            .map(WebhookVerifier::new)
            .ok_or_else(|| BridgeError::ConfigError(MISSING_WEBHOOK_SECRET.to_owned()))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| BridgeError::ConfigError(format!("invalid base_url {raw:?}: {e}")))?;

    if url.scheme() != "https" {
        return Err(BridgeError::ConfigError("base_url must use HTTPS".to_owned()));
    }

    match url.host_str() {
        None => Err(BridgeError::ConfigError(format!("base_url missing host: {raw}"))),
        Some("localhost" | "127.0.0.1" | "[::1]") => {
            Err(BridgeError::ConfigError("localhost base_url not allowed".to_owned()))
        }
        Some(_) => Ok(url),
    }
}
