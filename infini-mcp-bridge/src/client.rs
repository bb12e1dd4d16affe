//! Signed Infini API client.
//!
//! [`InfiniClient`] joins the configuration, the request signer and a
//! [`Transport`]. Each call serializes the JSON body compactly, signs the
//! method, path and body, sends the signature headers, and maps the response:
//!
//! | Response                 | Result                           |
//! |--------------------------|----------------------------------|
//! | 2xx with JSON body       | `Ok(value)`                      |
//! | 2xx with empty body      | `Ok(Value::Null)`                |
//! | 2xx with non-JSON body   | [`BridgeError::ApiError`]        |
//! | any other status         | [`BridgeError::ApiStatus`]       |
//!
//! Query parameters are appended to the URL but are not part of the signed path.
//!
//! # Examples
//!
//! ```rust,no_run
//! use infini_mcp_bridge::{InfiniClient, InfiniConfig};
//!
//! # async fn example() -> infini_mcp_bridge::error::Result<()> {
//! let config = InfiniConfig::from_env()?;
//! let client = InfiniClient::new(&config)?;
//!
//! let currencies = client.get("/currency", &[]).await?;
//! println!("{currencies}");
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{
    config::{Environment, InfiniConfig, MISSING_CREDENTIALS, MISSING_WEBHOOK_SECRET},
    error::{BridgeError, Result},
    signing::{Clock, HttpMethod, RequestSigner, SecretKey, SystemClock, WebhookVerifier},
    transport::{ApiRequest, HttpTransport, Transport, TransportResponse},
};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Client for the Infini open API.
///
/// Generic over the [`Transport`] and the signer's [`Clock`]; the defaults
/// are the reqwest transport and the wall clock.
#[derive(Debug)]
pub struct InfiniClient<T: Transport = HttpTransport, C: Clock = SystemClock> {
    transport: T,
    signer: Option<RequestSigner<C>>,
    webhook: Option<WebhookVerifier>,
    base_url: Url,
    environment: Environment,
}

impl InfiniClient {
    /// Creates a client with an [`HttpTransport`] built from `config.http`.
    ///
    /// Missing credentials do not fail here; signed calls fail later with
    /// [`BridgeError::ConfigError`].
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &InfiniConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> InfiniClient<T> {
    /// Creates a client over an explicit transport.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn with_transport(config: &InfiniConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let client = Self {
            transport,
            signer: config.request_signer().ok(),
            webhook: config.webhook_verifier().ok(),
            base_url: config.base_url()?,
            environment: config.environment,
        };

        info!(
            environment = %client.environment,
            base_url = %client.base_url,
            protocol = client.transport.protocol_name(),
            credentials = client.signer.is_some(),
            "infini client ready"
        );
        Ok(client)
    }
}

impl<T: Transport, C: Clock> InfiniClient<T, C> {
    /// Replaces the signer's clock.
    #[must_use]
    pub fn with_clock<K: Clock>(self, clock: K) -> InfiniClient<T, K> {
        InfiniClient {
            transport: self.transport,
            signer: self.signer.map(|signer| signer.with_clock(clock)),
            webhook: self.webhook,
            base_url: self.base_url,
            environment: self.environment,
        }
    }

    /// Environment this client talks to.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Resolved base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `true` when signed calls can be made.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a signed GET request.
    ///
    /// # Errors
    ///
    /// See [`InfiniClient::request`].
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.request::<Value>(HttpMethod::Get, path, None, query).await
    }

    /// Sends a signed POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`InfiniClient::request`].
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(HttpMethod::Post, path, Some(body), &[]).await
    }

    /// Sends a signed request and parses the JSON response.
    ///
    /// `path` is the API path (for example `/order/list`) without query
    /// string; `query` pairs are form-encoded onto the URL.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::ConfigError`] if credentials are missing
    /// - [`BridgeError::InvalidInput`] if `path` is malformed
    /// - [`BridgeError::SerializationError`] if the body cannot be serialized
    /// - [`BridgeError::HttpError`] / [`BridgeError::TransportError`] on delivery failure
    /// - [`BridgeError::ApiStatus`] for a non-2xx status
    /// - [`BridgeError::ApiError`] for a 2xx body that is not JSON
    #[instrument(skip(self, body, query), fields(environment = %self.environment, query_len = query.len()))]
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| BridgeError::ConfigError(MISSING_CREDENTIALS.to_owned()))?;

        validate_path(path)?;
        let url = self.build_url(path, query)?;

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| BridgeError::SerializationError(e.to_string()))?;

        let signed = signer.sign_request(method, path, body.as_deref())?;

        let mut request = ApiRequest::new(method, url);
        for (name, value) in signed.header_pairs() {
            request = request.with_header(name, value);
        }
        if let Some(body) = body {
            request = request.with_header("Content-Type", CONTENT_TYPE_JSON).with_body(body);
        }

        let response = self.transport.send(request).await?;
        parse_response(&response)
    }

    /// Verifies a webhook callback.
    ///
    /// Uses `secret` when supplied, else the configured webhook secret (which
    /// itself falls back to the API secret).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if no secret is available and
    /// [`BridgeError::InvalidInput`] for a malformed timestamp or empty
    /// supplied secret. A mismatch is `Ok(false)`.
    pub fn verify_webhook(
        &self,
        body: &[u8],
        timestamp: &str,
        signature: &str,
        secret: Option<&str>,
    ) -> Result<bool> {
        match secret.filter(|s| !s.is_empty()) {
            Some(secret) => {
                WebhookVerifier::new(SecretKey::new(secret)?).verify(body, timestamp, signature)
            }
            None => self
                .webhook
                .as_ref()
                .ok_or_else(|| BridgeError::ConfigError(MISSING_WEBHOOK_SECRET.to_owned()))?
                .verify(body, timestamp, signature),
        }
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| BridgeError::InvalidInput(format!("invalid request path {path:?}: {e}")))?;

        // The signed path must be exactly the path sent on the wire.
        let expected = format!("{}{path}", self.base_url.path().trim_end_matches('/'));
        if url.path() != expected {
            return Err(BridgeError::InvalidInput(format!(
                "path {path:?} is not in normalized form (would be sent as {:?})",
                url.path()
            )));
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(BridgeError::InvalidInput(format!("path must start with '/': {path:?}")));
    }
    if path.contains(['?', '#']) {
        return Err(BridgeError::InvalidInput(
            "path must not carry a query string or fragment".to_owned(),
        ));
    }
    Ok(())
}

fn parse_response(response: &TransportResponse) -> Result<Value> {
    if !response.is_success() {
        warn!(status = response.status, "infini API returned error status");
        return Err(BridgeError::ApiStatus {
            status: response.status,
            detail: response.body_text(),
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        debug!(status = response.status, "empty response body");
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|e| BridgeError::ApiError(e.to_string()))
}
