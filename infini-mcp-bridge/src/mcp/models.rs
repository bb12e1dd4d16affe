//! Tool parameter and request body types.
//!
//! Parameter structs are what the MCP layer deserializes from tool calls;
//! their doc comments become the JSON schema descriptions agents see.
//! Request structs are the exact JSON bodies sent to Infini.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for `create_payment_order`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CreatePaymentOrderParams {
    /// Unique request ID (UUID recommended); makes order creation idempotent.
    pub request_id: String,
    /// Order amount as a decimal string, e.g. "100.00".
    pub amount: String,
    /// Client reference string.
    #[serde(default)]
    pub client_reference: Option<String>,
    /// Order description.
    #[serde(default)]
    pub order_desc: Option<String>,
    /// Custom merchant alias shown at checkout.
    #[serde(default)]
    pub merchant_alias: Option<String>,
    /// Time to live in seconds (0 for the provider default).
    #[serde(default)]
    pub expires_in: u64,
    /// Redirect URL after a successful payment.
    #[serde(default)]
    pub success_url: Option<String>,
    /// Redirect URL after a failed payment.
    #[serde(default)]
    pub failure_url: Option<String>,
}

/// Parameters for `get_payment_order`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetPaymentOrderParams {
    /// The order ID to query.
    pub order_id: String,
}

/// Parameters for `list_payment_orders`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPaymentOrdersParams {
    /// Filter by currency (USDC/USDT).
    #[serde(default)]
    pub currency: Option<String>,
    /// Filter by order status.
    #[serde(default)]
    pub status: Option<String>,
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListPaymentOrdersParams {
    fn default() -> Self {
        Self { currency: None, status: None, page: default_page(), page_size: default_page_size() }
    }
}

const fn default_page() -> u32 {
    1
}

const fn default_page_size() -> u32 {
    10
}

/// Parameters for `reissue_order_token`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ReissueOrderTokenParams {
    /// The order ID to reissue the checkout token for.
    pub order_id: String,
}

/// Parameters for `withdraw_funds`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct WithdrawFundsParams {
    /// Blockchain network name.
    pub chain: String,
    /// Token identifier.
    pub token_type: String,
    /// Amount to withdraw as a decimal string.
    pub amount: String,
    /// Destination wallet address.
    pub wallet_address: String,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Parameters for `verify_webhook_signature`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct VerifyWebhookParams {
    /// Raw webhook body exactly as received.
    pub body: String,
    /// Signature from the webhook header.
    pub signature: String,
    /// Timestamp from the webhook header.
    pub timestamp: String,
    /// Webhook secret; the configured secret is used when omitted.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

/// Body of `POST /order`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderRequest {
    pub(crate) request_id: String,
    pub(crate) amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) client_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) order_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) merchant_alias: Option<String>,
    pub(crate) expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) failure_url: Option<String>,
}

/// Body of `POST /order/token/reissue`.
#[derive(Debug, Serialize)]
pub(crate) struct OrderIdRequest<'a> {
    pub(crate) order_id: &'a str,
}

/// Body of `POST /fund/withdraw`.
#[derive(Debug, Serialize)]
pub(crate) struct WithdrawRequest {
    pub(crate) chain: String,
    pub(crate) token_type: String,
    pub(crate) amount: String,
    pub(crate) wallet_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) note: Option<String>,
}

/// Outcome of a webhook verification tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebhookVerification {
    /// Whether the signature matched.
    pub verified: bool,
}

impl WebhookVerification {
    /// Human-readable outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        if self.verified {
            "Webhook signature verified successfully"
        } else {
            "Webhook signature verification failed"
        }
    }
}
