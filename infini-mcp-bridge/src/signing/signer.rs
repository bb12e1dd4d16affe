//! Outbound request signing with HMAC-SHA256.

use std::{fmt, str::FromStr};

use tracing::{debug, instrument};

use crate::{
    error::{BridgeError, Result},
    signing::{
        AUTHORIZATION_SCHEME, SIGNATURE_ALGORITHM, SIGNED_HEADERS, SecretKey,
        canonical::{Clock, SystemClock, digest_body, format_date, hmac_sha256_base64},
    },
};

/// HTTP methods accepted by the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Upper-case method token as it appears in the canonical string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = BridgeError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(BridgeError::InvalidInput(format!("unsupported HTTP method: {s}"))),
        }
    }
}

/// Header values produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `Date` header value (RFC 1123, GMT).
    pub date: String,
    /// `Authorization` header value.
    pub authorization: String,
    /// `Digest` header value, present only when the request carries a body.
    pub digest: Option<String>,
    /// Bare base64 HMAC-SHA256 signature embedded in `authorization`.
    pub signature: String,
}

impl SignedHeaders {
    /// Returns `(name, value)` pairs ready to be attached to a request.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("Date", self.date.as_str()), ("Authorization", self.authorization.as_str())];
        if let Some(digest) = &self.digest {
            pairs.push(("Digest", digest.as_str()));
        }
        pairs
    }
}

/// Everything that goes into one outbound signature.
///
/// Built fresh per request and dropped afterwards. The secret is held by
/// reference only.
#[derive(Debug, Clone)]
pub struct SigningContext<'a> {
    key_id: &'a str,
    method: HttpMethod,
    path: &'a str,
    body: Option<&'a [u8]>,
    secret: &'a SecretKey,
    date: String,
}

impl<'a> SigningContext<'a> {
    /// Creates a signing context.
    ///
    /// `path` is the request path without scheme, host or query string. `body`
    /// is `Some` for body-bearing requests, even when the body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the key id, path or date is empty, or if
    /// any of them contains a line break (which would forge a canonical line). The key
    /// id must also not contain `"`, which would break the header framing.
    pub fn new(
        key_id: &'a str,
        method: HttpMethod,
        path: &'a str,
        body: Option<&'a [u8]>,
        secret: &'a SecretKey,
        date: impl Into<String>,
    ) -> Result<Self> {
        let date = date.into();

        require_single_line("key id", key_id)?;
        require_single_line("path", path)?;
        require_single_line("date", &date)?;
        if key_id.contains('"') {
            return Err(BridgeError::InvalidInput("key id must not contain '\"'".to_owned()));
        }

        Ok(Self { key_id, method, path, body, secret, date })
    }

    /// Date string this context signs.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Builds the canonical signing string.
    ///
    /// ```text
    /// {keyId}
    /// {METHOD} {path}
    /// date: {date}
    /// digest: SHA-256={base64}      (only when a body is present)
    /// ```
    ///
    /// Lines are joined with `\n` and there is no trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use infini_mcp_bridge::signing::{HttpMethod, SecretKey, SigningContext};
    ///
    /// # fn example() -> infini_mcp_bridge::error::Result<()> {
    /// let secret = SecretKey::new("s3cr3t")?;
    /// let ctx = SigningContext::new(
    ///     "k1",
    ///     HttpMethod::Get,
    ///     "/api/v1/orders/123",
    ///     None,
    ///     &secret,
    ///     "Tue, 01 Jan 2024 00:00:00 GMT",
    /// )?;
    ///
    /// assert_eq!(
    ///     ctx.canonical_string(),
    ///     "k1\nGET /api/v1/orders/123\ndate: Tue, 01 Jan 2024 00:00:00 GMT"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn canonical_string(&self) -> String {
        self.build_canonical(self.body.map(digest_body).as_deref())
    }

    /// Signs the context and returns the header values.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EncodingError`] if the HMAC cannot be computed.
    pub fn sign(&self) -> Result<SignedHeaders> {
        let digest = self.body.map(digest_body);
        let canonical = self.build_canonical(digest.as_deref());
        let signature = hmac_sha256_base64(self.secret, canonical.as_bytes())?;

        debug!(
            method = %self.method,
            canonical_len = canonical.len(),
            has_digest = digest.is_some(),
            "request signed"
        );

        Ok(SignedHeaders {
            date: self.date.clone(),
            authorization: authorization_header(self.key_id, &signature),
            digest,
            signature,
        })
    }

    fn build_canonical(&self, digest: Option<&str>) -> String {
        let mut canonical =
            format!("{}\n{} {}\ndate: {}", self.key_id, self.method, self.path, self.date);
        if let Some(digest) = digest {
            canonical.push_str("\ndigest: ");
            canonical.push_str(digest);
        }
        canonical
    }
}

/// Composes the `Authorization` header from the provider's fixed template.
#[must_use]
pub(crate) fn authorization_header(key_id: &str, signature: &str) -> String {
    format!(
        "{AUTHORIZATION_SCHEME} keyId=\"{key_id}\",algorithm=\"{SIGNATURE_ALGORITHM}\",\
         headers=\"{SIGNED_HEADERS}\",signature=\"{signature}\""
    )
}

fn require_single_line(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BridgeError::InvalidInput(format!("{name} must not be empty")));
    }
    if value.contains(['\r', '\n']) {
        return Err(BridgeError::InvalidInput(format!("{name} must not contain line breaks")));
    }
    Ok(())
}

/// Signs outbound Infini API requests.
///
/// Holds the API key id and secret for one environment. Several signers (for
/// example sandbox and production) can live side by side.
#[derive(Debug, Clone)]
pub struct RequestSigner<C = SystemClock> {
    key_id: String,
    secret: SecretKey,
    clock: C,
}

impl RequestSigner {
    /// Creates a signer that reads the wall clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use infini_mcp_bridge::signing::{RequestSigner, SecretKey};
    ///
    /// let signer = RequestSigner::new("k1", SecretKey::new("s3cr3t").unwrap());
    /// assert_eq!(signer.key_id(), "k1");
    /// ```
    #[must_use]
    pub fn new(key_id: impl Into<String>, secret: SecretKey) -> Self {
        Self { key_id: key_id.into(), secret, clock: SystemClock }
    }
}

impl<C: Clock> RequestSigner<C> {
    /// Replaces the clock, typically with a [`FixedClock`](crate::signing::FixedClock) in tests.
    #[must_use]
    pub fn with_clock<K: Clock>(self, clock: K) -> RequestSigner<K> {
        RequestSigner { key_id: self.key_id, secret: self.secret, clock }
    }

    /// API key id placed in the canonical string and `Authorization` header.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Signs a request given the method name as a string.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] for an unrecognized method or an empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use infini_mcp_bridge::signing::{RequestSigner, SecretKey};
    ///
    /// # fn example() -> infini_mcp_bridge::error::Result<()> {
    /// let signer = RequestSigner::new("k1", SecretKey::new("s3cr3t")?);
    ///
    /// let headers = signer.sign("POST", "/order", Some(br#"{"amount":"1.00"}"#))?;
    /// assert!(headers.authorization.starts_with("Signature keyId=\"k1\""));
    /// assert!(headers.digest.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn sign(&self, method: &str, path: &str, body: Option<&[u8]>) -> Result<SignedHeaders> {
        self.sign_request(method.parse()?, path, body)
    }

    /// Signs a request stamped with the current time from the signer's clock.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] for an empty path or a path with line breaks,
    /// and [`BridgeError::EncodingError`] if the HMAC cannot be computed.
    #[instrument(skip(self, body), fields(key_id = %self.key_id, body_len = body.map_or(0, <[u8]>::len)))]
    pub fn sign_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<SignedHeaders> {
        let date = format_date(self.clock.now());
        SigningContext::new(&self.key_id, method, path, body, &self.secret, date)?.sign()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::signing::{FixedClock, canonical::decode_base64};

    const FIXTURE_DATE: &str = "Tue, 01 Jan 2024 00:00:00 GMT";
    const ORDER_BODY: &[u8] = br#"{"request_id":"r-1","amount":"100.00"}"#;

    fn secret() -> SecretKey {
        SecretKey::new("s3cr3t").unwrap()
    }

    fn fixed_signer() -> RequestSigner<FixedClock> {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        RequestSigner::new("k1", secret()).with_clock(FixedClock::new(instant))
    }

    #[test]
    fn test_get_canonical_string_fixture() {
        let secret = secret();
        let ctx = SigningContext::new(
            "k1",
            HttpMethod::Get,
            "/api/v1/orders/123",
            None,
            &secret,
            FIXTURE_DATE,
        )
        .unwrap();

        assert_eq!(
            ctx.canonical_string(),
            "k1\nGET /api/v1/orders/123\ndate: Tue, 01 Jan 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn test_get_signature_fixture() {
        let secret = secret();
        let ctx = SigningContext::new(
            "k1",
            HttpMethod::Get,
            "/api/v1/orders/123",
            None,
            &secret,
            FIXTURE_DATE,
        )
        .unwrap();

        let headers = ctx.sign().unwrap();
        assert_eq!(headers.signature, "2YSrccpY8HBpF3vMZotjTQZj1qc0GMO5BBxJad03b8Y=");
        assert_eq!(headers.date, FIXTURE_DATE);
        assert!(headers.digest.is_none());
    }

    #[test]
    fn test_post_signature_fixture() {
        let secret = secret();
        let ctx =
            SigningContext::new("k1", HttpMethod::Post, "/order", Some(ORDER_BODY), &secret, FIXTURE_DATE)
                .unwrap();

        assert_eq!(
            ctx.canonical_string(),
            "k1\nPOST /order\ndate: Tue, 01 Jan 2024 00:00:00 GMT\ndigest: \
             SHA-256=co2U1m0itK9gZgxrtxDwqYyBQWlKY4U9zFpsi7ZnCIc="
        );

        let headers = ctx.sign().unwrap();
        assert_eq!(headers.signature, "cN7CJ3oRFFE+NghLvCJre3h7oKABcx14pK0abKoHu2U=");
        assert_eq!(
            headers.digest.as_deref(),
            Some("SHA-256=co2U1m0itK9gZgxrtxDwqYyBQWlKY4U9zFpsi7ZnCIc=")
        );
    }

    #[test]
    fn test_empty_body_still_digested() {
        let secret = secret();
        let ctx = SigningContext::new("k1", HttpMethod::Post, "/order", Some(b""), &secret, FIXTURE_DATE)
            .unwrap();

        let headers = ctx.sign().unwrap();
        assert_eq!(
            headers.digest.as_deref(),
            Some("SHA-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=")
        );
        assert_eq!(headers.signature, "SWh+h6oIwTtOjFL0PUL+UdrAQdopyDbRn7sMuuGajZU=");
    }

    #[test]
    fn test_canonical_has_no_trailing_newline() {
        let secret = secret();
        let ctx = SigningContext::new("k1", HttpMethod::Post, "/order", Some(ORDER_BODY), &secret, FIXTURE_DATE)
            .unwrap();
        assert!(!ctx.canonical_string().ends_with('\n'));
        assert_eq!(ctx.canonical_string().lines().count(), 4);
    }

    #[test]
    fn test_body_changes_canonical_and_signature() {
        let secret = secret();
        let without = SigningContext::new("k1", HttpMethod::Post, "/order", None, &secret, FIXTURE_DATE)
            .unwrap();
        let with = SigningContext::new("k1", HttpMethod::Post, "/order", Some(b"x"), &secret, FIXTURE_DATE)
            .unwrap();

        assert_ne!(without.canonical_string(), with.canonical_string());
        assert_ne!(without.sign().unwrap().signature, with.sign().unwrap().signature);
    }

    #[test]
    fn test_authorization_header_format() {
        let headers = fixed_signer().sign("GET", "/api/v1/orders/123", None).unwrap();

        assert_eq!(
            headers.authorization,
            format!(
                "Signature keyId=\"k1\",algorithm=\"hmac-sha256\",headers=\"@request-target \
                 date\",signature=\"{}\"",
                headers.signature
            )
        );
    }

    #[test]
    fn test_signature_is_32_bytes() {
        let headers = fixed_signer().sign("POST", "/order", Some(ORDER_BODY)).unwrap();
        assert_eq!(decode_base64(&headers.signature).unwrap().len(), 32);
    }

    #[test]
    fn test_signer_uses_clock() {
        let headers = fixed_signer().sign("GET", "/currency", None).unwrap();
        assert_eq!(headers.date, "Mon, 01 Jan 2024 00:00:00 GMT");
    }

    #[test]
    fn test_signer_is_deterministic_with_fixed_clock() {
        let signer = fixed_signer();
        let first = signer.sign("POST", "/order", Some(ORDER_BODY)).unwrap();
        let second = signer.sign("POST", "/order", Some(ORDER_BODY)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_method_is_upper_cased() {
        let signer = fixed_signer();
        let lower = signer.sign("get", "/currency", None).unwrap();
        let upper = signer.sign("GET", "/currency", None).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = fixed_signer().sign("BREW", "/coffee", None);
        assert!(matches!(result, Err(BridgeError::InvalidInput(msg)) if msg.contains("BREW")));
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = fixed_signer().sign("GET", "", None);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_path_with_newline_rejected() {
        let result = fixed_signer().sign("GET", "/order\ndate: forged", None);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_key_id_with_quote_rejected() {
        let secret = secret();
        let result =
            SigningContext::new("k\"1", HttpMethod::Get, "/order", None, &secret, FIXTURE_DATE);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_key_id_rejected() {
        let secret = secret();
        let result = SigningContext::new("", HttpMethod::Get, "/order", None, &secret, FIXTURE_DATE);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_header_pairs() {
        let signer = fixed_signer();

        let get = signer.sign("GET", "/currency", None).unwrap();
        let names: Vec<_> = get.header_pairs().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Date", "Authorization"]);

        let post = signer.sign("POST", "/order", Some(ORDER_BODY)).unwrap();
        let names: Vec<_> = post.header_pairs().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Date", "Authorization", "Digest"]);
    }

    #[test]
    fn test_http_method_roundtrip() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn test_different_secrets_produce_different_signatures() {
        let other = RequestSigner::new("k1", SecretKey::new("other").unwrap())
            .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));

        let a = fixed_signer().sign("GET", "/currency", None).unwrap();
        let b = other.sign("GET", "/currency", None).unwrap();
        assert_ne!(a.signature, b.signature);
    }
}
