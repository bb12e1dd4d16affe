//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 over rustls via reqwest.

use reqwest::{Client, Method};
use tracing::{debug, instrument};

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{BridgeError, Result},
    signing::HttpMethod,
    transport::{ApiRequest, Sealed, Transport, TransportResponse},
};

/// Rejects header names and values carrying control characters that would
/// split the header block.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.is_empty() || name.contains(['\r', '\n', '\0', ':']) {
        return Err(BridgeError::TransportError(format!("Invalid header name: {name:?}")));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(BridgeError::TransportError(format!(
            "Invalid value for header {name}: control characters not allowed"
        )));
    }
    Ok(())
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Connection pooling and keep-alive are handled by the inner client, which
/// is cheap to clone and safe to share across tasks.
///
/// # Examples
///
/// ```
/// use infini_mcp_bridge::transport::{HttpConfig, HttpTransport, HttpVersion, Transport};
///
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport with [`HttpConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of range or the HTTP client
    /// cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(BridgeError::HttpError)?;

        Ok(Self { client, http_version: config.http_version })
    }
}

impl Transport for HttpTransport {
    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = request.url.path(), protocol = self.protocol_name())
    )]
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse> {
        for (name, value) in &request.headers {
            validate_header(name, value)?;
        }

        let mut builder = self.client.request(to_reqwest_method(request.method), request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, body_len = body.len(), "received response");

        Ok(TransportResponse { status, body })
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.protocol_name(), "http");
    }

    #[test]
    fn test_http_transport_protocol_name() {
        let cases = [
            (HttpVersion::Http1, "http/1.1"),
            (HttpVersion::Http2, "http/2"),
            (HttpVersion::Auto, "http"),
        ];
        for (http_version, expected) in cases {
            let config = HttpConfig { http_version, ..Default::default() };
            let transport = HttpTransport::with_config(&config).unwrap();
            assert_eq!(transport.protocol_name(), expected);
        }
    }

    #[test]
    fn test_http_transport_rejects_invalid_config() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = HttpTransport::with_config(&config);
        assert!(matches!(result, Err(BridgeError::ConfigError(_))));
    }

    #[test]
    fn test_validate_header_accepts_signature_headers() {
        assert!(validate_header("Date", "Mon, 01 Jan 2024 00:00:00 GMT").is_ok());
        assert!(
            validate_header(
                "Authorization",
                r#"Signature keyId="k1",algorithm="hmac-sha256",headers="@request-target date",signature="abc=""#,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_validate_header_rejects_crlf() {
        assert!(validate_header("X-Evil", "a\r\nInjected: yes").is_err());
        assert!(validate_header("X-Evil", "a\nb").is_err());
        assert!(validate_header("X-Evil", "a\0b").is_err());
        assert!(validate_header("X-Evil\r\n", "a").is_err());
        assert!(validate_header("", "a").is_err());
        assert!(validate_header("X:Evil", "a").is_err());
    }

    #[tokio::test]
    async fn test_send_rejects_injected_header_before_network() {
        let transport = HttpTransport::new().unwrap();
        let url = Url::parse("https://openapi-sandbox.infini.money/currency").unwrap();
        let request =
            ApiRequest::new(HttpMethod::Get, url).with_header("Date", "today\r\nX-Injected: 1");

        let result = transport.send(request).await;
        assert!(matches!(result, Err(BridgeError::TransportError(_))));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), Method::DELETE);
        assert_eq!(to_reqwest_method(HttpMethod::Options), Method::OPTIONS);
    }
}
