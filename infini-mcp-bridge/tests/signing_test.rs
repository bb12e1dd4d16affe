//! Integration tests for outbound request signing.
//!
//! Fixtures were computed once with an independent HMAC-SHA256 implementation
//! and must not change.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use infini_mcp_bridge::{
    BridgeError,
    signing::{
        FixedClock, HttpMethod, RequestSigner, SecretKey, SigningContext, digest_body, format_date,
    },
};

const DATE: &str = "Tue, 01 Jan 2024 00:00:00 GMT";

fn fixed_signer() -> RequestSigner<FixedClock> {
    RequestSigner::new("k1", SecretKey::new("s3cr3t").unwrap())
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
}

#[test]
fn test_get_scenario_fixture() {
    let secret = SecretKey::new("s3cr3t").unwrap();
    let ctx =
        SigningContext::new("k1", HttpMethod::Get, "/api/v1/orders/123", None, &secret, DATE)
            .unwrap();

    assert_eq!(ctx.canonical_string(), "k1\nGET /api/v1/orders/123\ndate: Tue, 01 Jan 2024 00:00:00 GMT");

    let headers = ctx.sign().unwrap();
    assert_eq!(headers.signature, "2YSrccpY8HBpF3vMZotjTQZj1qc0GMO5BBxJad03b8Y=");
    assert_eq!(
        headers.authorization,
        "Signature keyId=\"k1\",algorithm=\"hmac-sha256\",headers=\"@request-target date\",\
         signature=\"2YSrccpY8HBpF3vMZotjTQZj1qc0GMO5BBxJad03b8Y=\""
    );
    assert_eq!(headers.date, DATE);
    assert!(headers.digest.is_none());
}

#[test]
fn test_post_scenario_fixture() {
    let secret = SecretKey::new("s3cr3t").unwrap();
    let body = br#"{"request_id":"r-1","amount":"100.00"}"#;
    let ctx = SigningContext::new("k1", HttpMethod::Post, "/order", Some(body), &secret, DATE)
        .unwrap();

    let headers = ctx.sign().unwrap();
    assert_eq!(headers.digest.as_deref(), Some("SHA-256=co2U1m0itK9gZgxrtxDwqYyBQWlKY4U9zFpsi7ZnCIc="));
    assert_eq!(headers.signature, "cN7CJ3oRFFE+NghLvCJre3h7oKABcx14pK0abKoHu2U=");

    let names: Vec<&str> = headers.header_pairs().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Date", "Authorization", "Digest"]);
}

#[test]
fn test_digest_is_over_raw_bytes() {
    let compact = digest_body(br#"{"a":1}"#);
    let spaced = digest_body(br#"{ "a": 1 }"#);
    assert_ne!(compact, spaced);
    assert!(compact.starts_with("SHA-256="));
}

#[test]
fn test_method_is_uppercased() {
    let signer = fixed_signer();
    let lower = signer.sign("get", "/currency", None).unwrap();
    let upper = signer.sign("GET", "/currency", None).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn test_unknown_method_rejected() {
    let err = fixed_signer().sign("BREW", "/coffee", None).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidInput(_)));
}

#[test]
fn test_empty_path_rejected() {
    let err = fixed_signer().sign("GET", "", None).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidInput(_)));
}

#[test]
fn test_line_break_in_path_rejected() {
    let err = fixed_signer().sign("GET", "/order\ndate: forged", None).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidInput(_)));
}

#[test]
fn test_format_date_is_gmt() {
    let instant = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
    assert_eq!(format_date(instant), "Tue, 14 Nov 2023 22:13:20 GMT");
}

#[test]
fn test_independent_signers_do_not_interfere() {
    let sandbox = RequestSigner::new("sandbox-key", SecretKey::new("sandbox-secret").unwrap())
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let production = fixed_signer();

    let a = sandbox.sign("GET", "/currency", None).unwrap();
    let b = production.sign("GET", "/currency", None).unwrap();

    assert_ne!(a.signature, b.signature);
    assert!(a.authorization.contains("keyId=\"sandbox-key\""));
    assert!(b.authorization.contains("keyId=\"k1\""));
}

#[tokio::test]
async fn test_concurrent_signing_is_deterministic() {
    let signer = Arc::new(fixed_signer());
    let expected = signer.sign("POST", "/order", Some(b"{}")).unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let signer = Arc::clone(&signer);
            tokio::spawn(async move { signer.sign("POST", "/order", Some(b"{}")).unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
