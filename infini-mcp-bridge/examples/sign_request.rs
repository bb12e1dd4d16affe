//! Direct request signing and webhook verification example.
//!
//! Shows the headers the bridge attaches to an Infini API call and how a
//! webhook callback is checked, without sending anything over the network.
//!
//! # Running this example
//!
//! ```bash
//! export INFINI_API_KEY=your-key-id
//! export INFINI_SECRET_KEY=your-secret
//! cargo run --example sign_request
//! ```

#![allow(
    clippy::print_stdout,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use infini_mcp_bridge::{
    InfiniConfig,
    signing::{WebhookVerifier, webhook_signing_payload},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Infini MCP Bridge: Request Signing Example\n");

    println!("SECURITY NOTICE:");
    println!("  Never hardcode API secrets in source code");
    println!("  Load them from the environment or a secrets manager\n");

    // Step 1: Load credentials
    println!("1. Loading configuration from environment...");
    let config = InfiniConfig::from_env()?;
    println!("   Environment: {}", config.environment);
    println!("   Base URL:    {}\n", config.base_url()?);

    let signer = config.request_signer()?;

    // Step 2: GET request, no body and no digest
    println!("2. Signing GET /order/list ...");
    let headers = signer.sign("GET", "/order/list", None)?;
    for (name, value) in headers.header_pairs() {
        println!("   {}: {}", name, value);
    }
    println!();

    // Step 3: POST request, body digest included
    let body = br#"{"request_id":"9f0c8a52-0c5e-4bb0-9a6e-1f0d0d2e6f11","amount":"100.00","expires_in":0}"#;
    println!("3. Signing POST /order ...");
    let headers = signer.sign("POST", "/order", Some(body))?;
    for (name, value) in headers.header_pairs() {
        println!("   {}: {}", name, value);
    }
    println!();

    // Step 4: Webhook round trip
    println!("4. Verifying a webhook callback...");
    let verifier: WebhookVerifier = config.webhook_verifier()?;
    let timestamp = "1700000000";
    let callback = br#"{"event":"order.paid","order_id":"abc"}"#;
    let signature = verifier.sign(timestamp, callback)?;
    println!("   Payload bytes: {}", webhook_signing_payload(timestamp, callback).len());
    println!("   Signature:     {}", signature);
    println!("   Valid:         {}", verifier.verify(callback, timestamp, &signature)?);
    println!("   Tampered:      {}", verifier.verify(b"{}", timestamp, &signature)?);

    Ok(())
}
