//! Infini MCP Bridge: signed access to the Infini payment API for AI agents
//!
//! A Rust library that lets Model Context Protocol (MCP) agents create and
//! manage Infini crypto payment orders. Every outbound call is authenticated
//! with an HMAC-SHA256 request signature, and inbound webhooks are verified
//! with a constant-time comparison.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AI Agent      │  any MCP-compatible agent
//! └────────┬────────┘
//!          │ MCP Protocol (JSON-RPC 2.0 over stdio)
//!          │
//! ┌────────▼────────────────────────────────────────┐
//! │          Infini MCP Bridge (this crate)         │
//! │  ┌──────────────┐      ┌──────────────────┐     │
//! │  │  MCP Tools   │──────│  Request Signer  │     │
//! │  │  (orders,    │      │  (HMAC-SHA256,   │     │
//! │  │   funds)     │      │   SHA-256 digest)│     │
//! │  └──────────────┘      └──────────────────┘     │
//! └────────┬────────────────────────────────────────┘
//!          │ HTTPS + Authorization: Signature ...
//!          │
//! ┌────────▼────────┐
//! │  Infini API     │  sandbox or production
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Create a Payment Order
//!
//! ```rust,no_run
//! use infini_mcp_bridge::{
//!     InfiniClient, InfiniConfig,
//!     mcp::{CreatePaymentOrderParams, create_payment_order},
//! };
//!
//! # async fn example() -> infini_mcp_bridge::error::Result<()> {
//! // Reads INFINI_API_KEY, INFINI_SECRET_KEY and INFINI_ENV
//! let config = InfiniConfig::from_env()?;
//! let client = InfiniClient::new(&config)?;
//!
//! let params = CreatePaymentOrderParams {
//!     request_id: "9f0c8a52-0c5e-4bb0-9a6e-1f0d0d2e6f11".into(),
//!     amount: "100.00".into(),
//!     ..Default::default()
//! };
//!
//! let order = create_payment_order(&client, params).await?;
//! println!("{order}");
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Sign a Request Directly
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use infini_mcp_bridge::signing::{FixedClock, RequestSigner, SecretKey};
//!
//! # fn example() -> infini_mcp_bridge::error::Result<()> {
//! let signer = RequestSigner::new("k1", SecretKey::new("s3cr3t")?)
//!     .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
//!
//! let headers = signer.sign("GET", "/order", None)?;
//! assert_eq!(headers.date, "Mon, 01 Jan 2024 00:00:00 GMT");
//! assert!(headers.digest.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Verify a Webhook
//!
//! ```rust
//! use infini_mcp_bridge::signing::{SecretKey, WebhookVerifier};
//!
//! # fn example() -> infini_mcp_bridge::error::Result<()> {
//! let verifier = WebhookVerifier::new(SecretKey::new("whsec123")?);
//! let valid = verifier.verify(
//!     br#"{"order_id":"abc"}"#,
//!     "1700000000",
//!     "jC53y1G0GGatJ0fyp8iKe4DDLihQDyOyTKILdGAYnVo=",
//! )?;
//! assert!(valid);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`signing`]: canonical strings, request signing, webhook verification
//! - [`config`]: environment and TOML configuration
//! - [`transport`]: sealed transport trait and the reqwest implementation
//! - [`client`]: signed API client
//! - [`mcp`]: tool functions exposed to agents
//! - [`error`]: error types
//!
//! # Security Considerations
//!
//! - Secrets are held in [`signing::SecretKey`], zeroed on drop and redacted in `Debug`
//! - Webhook signatures are compared in constant time
//! - Base URL overrides must be HTTPS and may not point at localhost
//! - Header values are checked for CR/LF before sending
//! - Secrets, bodies and canonical strings are never logged
//!
//! # Error Handling
//!
//! All operations return [`Result<T, BridgeError>`](error::Result):
//!
//! ```rust,no_run
//! use infini_mcp_bridge::{BridgeError, InfiniClient, InfiniConfig};
//!
//! # async fn example() -> infini_mcp_bridge::error::Result<()> {
//! let client = InfiniClient::new(&InfiniConfig::from_env()?)?;
//!
//! match client.get("/currency", &[]).await {
//!     Ok(value) => println!("{value}"),
//!     Err(BridgeError::ConfigError(msg)) => eprintln!("Set credentials: {msg}"),
//!     Err(BridgeError::ApiStatus { status, detail }) => {
//!         eprintln!("Infini rejected the call ({status}): {detail}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod signing;
pub mod transport;

pub use client::InfiniClient;
pub use config::{Environment, InfiniConfig};
pub use error::{BridgeError, Result};
