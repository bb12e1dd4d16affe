//! Benchmark suite for request signing and webhook verification.
//!
//! Measures:
//! - Canonical string construction and HMAC for GET and POST requests
//! - Signing cost as the body grows
//! - Webhook verification
//! - Constant-time comparison at different mismatch positions
//!
//! Run with: `cargo bench --bench signing_overhead`

#![allow(clippy::let_underscore_must_use, reason = "Criterion benchmarks ignore results")]
#![allow(missing_docs, reason = "Benchmark functions are self-documenting")]

use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use infini_mcp_bridge::signing::{
    FixedClock, HttpMethod, RequestSigner, SecretKey, WebhookVerifier, constant_time_eq,
};

fn setup_signer() -> RequestSigner<FixedClock> {
    let secret = SecretKey::new("bench-api-secret-0123456789abcdef").unwrap();
    RequestSigner::new("bench-key-id", secret)
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
}

fn bench_sign_get(c: &mut Criterion) {
    let signer = setup_signer();

    c.bench_function("sign_get", |b| {
        b.iter(|| {
            let result =
                signer.sign_request(black_box(HttpMethod::Get), black_box("/order/list"), None);
            black_box(result)
        });
    });
}

fn bench_sign_post(c: &mut Criterion) {
    let signer = setup_signer();
    let body = br#"{"request_id":"9f0c8a52-0c5e-4bb0-9a6e-1f0d0d2e6f11","amount":"100.00","expires_in":0}"#;

    c.bench_function("sign_post", |b| {
        b.iter(|| {
            let result = signer.sign_request(
                black_box(HttpMethod::Post),
                black_box("/order"),
                Some(black_box(&body[..])),
            );
            black_box(result)
        });
    });
}

fn bench_sign_body_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_body_size");
    let signer = setup_signer();

    for size in [64usize, 1024, 16 * 1024, 256 * 1024] {
        let body = vec![b'x'; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &body, |b, body| {
            b.iter(|| {
                let result = signer.sign_request(
                    HttpMethod::Post,
                    "/fund/withdraw",
                    Some(black_box(body.as_slice())),
                );
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_webhook_verify(c: &mut Criterion) {
    let verifier = WebhookVerifier::new(SecretKey::new("whsec123").unwrap());
    let body = br#"{"event":"order.paid","order_id":"abc","amount":"100.00"}"#;
    let signature = verifier.sign("1700000000", body).unwrap();

    c.bench_function("webhook_verify", |b| {
        b.iter(|| {
            let result =
                verifier.verify(black_box(body), black_box("1700000000"), black_box(&signature));
            black_box(result)
        });
    });
}

/// Timing should not depend on where the first differing byte sits.
fn bench_constant_time_eq(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_time_eq");
    let expected = [b'A'; 44];

    for position in [0usize, 21, 43] {
        let mut provided = expected;
        provided[position] = b'B';
        group.bench_with_input(BenchmarkId::new("mismatch_at", position), &provided, |b, p| {
            b.iter(|| black_box(constant_time_eq(black_box(&expected), black_box(p))));
        });
    }
    group.bench_function("match", |b| {
        b.iter(|| black_box(constant_time_eq(black_box(&expected), black_box(&expected))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sign_get,
    bench_sign_post,
    bench_sign_body_size,
    bench_webhook_verify,
    bench_constant_time_eq
);
criterion_main!(benches);
