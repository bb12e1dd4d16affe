//! Model Context Protocol (MCP) tool functions.
//!
//! Each tool validates its parameters and calls the signed [`InfiniClient`].
//! The server binary wraps these functions in MCP tool handlers.
//!
//! # Available Tools
//!
//! ## Payment Orders
//! - [`orders::create_payment_order`]: `POST /order`
//! - [`orders::get_payment_order`]: `GET /order?order_id=`
//! - [`orders::list_payment_orders`]: `GET /order/list`
//! - [`orders::reissue_order_token`]: `POST /order/token/reissue`
//!
//! ## Catalogue and Funds
//! - [`currency::get_supported_currencies`]: `GET /currency`
//! - [`funds::withdraw_funds`]: `POST /fund/withdraw`
//!
//! ## Webhooks
//! - [`webhook::verify_webhook_signature`]: local check, no HTTP
//!
//! # Architecture
//!
//! ```text
//! AI Agent
//!     │
//!     │ MCP Protocol (JSON-RPC 2.0 over stdio)
//!     ▼
//! MCP Tools (this module)
//!     │
//!     │ Parameter validation
//!     ▼
//! InfiniClient (HMAC-SHA256 request signing)
//!     │
//!     ▼
//! Infini open API (HTTPS)
//! ```
//!
//! [`InfiniClient`]: crate::client::InfiniClient

pub mod currency;
pub mod funds;
pub mod models;
pub mod orders;
pub mod webhook;

pub use currency::get_supported_currencies;
pub use funds::withdraw_funds;
pub use models::{
    CreatePaymentOrderParams, GetPaymentOrderParams, ListPaymentOrdersParams,
    ReissueOrderTokenParams, VerifyWebhookParams, WebhookVerification, WithdrawFundsParams,
};
pub use orders::{create_payment_order, get_payment_order, list_payment_orders, reissue_order_token};
pub use webhook::verify_webhook_signature;

use crate::error::{BridgeError, Result};

/// Rejects an empty or whitespace-only required field.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// Drops empty optional strings so they are omitted from request bodies.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
