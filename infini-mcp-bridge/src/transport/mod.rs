//! Transport abstraction layer.
//!
//! The transport moves an already signed [`ApiRequest`] over the wire and
//! hands back the raw [`TransportResponse`]. Signing, JSON handling and
//! status interpretation belong to [`crate::client`]; the transport never
//! retries and never maps status codes to errors.
//!
//! # Examples
//!
//! ```rust,no_run
//! use infini_mcp_bridge::{
//!     signing::HttpMethod,
//!     transport::{ApiRequest, HttpTransport, Transport},
//! };
//! use url::Url;
//!
//! # async fn example() -> infini_mcp_bridge::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let url = Url::parse("https://openapi-sandbox.infini.money/currency").unwrap();
//! let request = ApiRequest::new(HttpMethod::Get, url)
//!     .with_header("Date", "Mon, 01 Jan 2024 00:00:00 GMT");
//!
//! let response = transport.send(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use url::Url;

use crate::{error::Result, signing::HttpMethod};

pub mod config;
pub mod http;
mod sealed;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;
pub(crate) use sealed::private::Sealed;

/// A fully prepared outbound request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: Url,
    /// Headers to send, in order.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response from a transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport protocol abstraction.
///
/// This trait is sealed; only implementations within this crate exist.
pub trait Transport: Sealed + Send + Sync {
    /// Sends `request` and returns the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns error if a header is malformed or the request cannot be
    /// delivered (DNS, TLS, timeout).
    fn send(&self, request: ApiRequest)
    -> impl Future<Output = Result<TransportResponse>> + Send + '_;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
