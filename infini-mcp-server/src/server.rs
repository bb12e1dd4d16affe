//! MCP tool handlers.
//!
//! Each handler forwards to the matching function in
//! [`infini_mcp_bridge::mcp`] and renders the outcome as MCP content:
//! successes as pretty JSON text, failures as tool errors carrying the
//! error message.

use std::{fmt, sync::Arc};

use infini_mcp_bridge::{
    BridgeError, InfiniClient,
    mcp::{
        self, CreatePaymentOrderParams, GetPaymentOrderParams, ListPaymentOrdersParams,
        ReissueOrderTokenParams, VerifyWebhookParams, WithdrawFundsParams,
    },
};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;
use tracing::warn;

const INSTRUCTIONS: &str = "Tools for the Infini crypto payment API: create, query and list \
                            payment orders, reissue checkout tokens, list supported currencies, \
                            withdraw funds and verify webhook signatures.";

/// MCP server exposing the Infini tools.
#[derive(Clone)]
pub struct InfiniServer {
    client: Arc<InfiniClient>,
    tool_router: ToolRouter<Self>,
}

impl fmt::Debug for InfiniServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniServer")
            .field("environment", &self.client.environment())
            .field("base_url", &self.client.base_url().as_str())
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl InfiniServer {
    /// Creates a server over `client`.
    #[must_use]
    pub fn new(client: InfiniClient) -> Self {
        Self { client: Arc::new(client), tool_router: Self::tool_router() }
    }

    #[tool(description = "Create a new payment order in Infini")]
    async fn create_payment_order(
        &self,
        Parameters(params): Parameters<CreatePaymentOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = mcp::create_payment_order(&self.client, params).await;
        Ok(tool_result("create_payment_order", result))
    }

    #[tool(description = "Get payment order details by order ID")]
    async fn get_payment_order(
        &self,
        Parameters(params): Parameters<GetPaymentOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = mcp::get_payment_order(&self.client, params).await;
        Ok(tool_result("get_payment_order", result))
    }

    #[tool(description = "List payment orders with optional currency and status filters")]
    async fn list_payment_orders(
        &self,
        Parameters(params): Parameters<ListPaymentOrdersParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = mcp::list_payment_orders(&self.client, params).await;
        Ok(tool_result("list_payment_orders", result))
    }

    #[tool(description = "Reissue the checkout URL token for an existing order")]
    async fn reissue_order_token(
        &self,
        Parameters(params): Parameters<ReissueOrderTokenParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = mcp::reissue_order_token(&self.client, params).await;
        Ok(tool_result("reissue_order_token", result))
    }

    #[tool(description = "Get the list of cryptocurrencies supported for creating orders")]
    async fn get_supported_currencies(&self) -> Result<CallToolResult, McpError> {
        let result = mcp::get_supported_currencies(&self.client).await;
        Ok(tool_result("get_supported_currencies", result))
    }

    #[tool(description = "Withdraw funds to an external wallet")]
    async fn withdraw_funds(
        &self,
        Parameters(params): Parameters<WithdrawFundsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = mcp::withdraw_funds(&self.client, params).await;
        Ok(tool_result("withdraw_funds", result))
    }

    #[tool(description = "Verify a webhook signature from Infini")]
    async fn verify_webhook_signature(
        &self,
        Parameters(params): Parameters<VerifyWebhookParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match mcp::verify_webhook_signature(&self.client, &params) {
            Ok(outcome) => CallToolResult::success(vec![Content::text(outcome.message())]),
            Err(e) => tool_error("verify_webhook_signature", &e),
        })
    }
}

#[tool_handler]
impl ServerHandler for InfiniServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_owned()),
            ..Default::default()
        }
    }
}

fn tool_result(tool: &str, result: infini_mcp_bridge::Result<Value>) -> CallToolResult {
    match result.and_then(|value| {
        serde_json::to_string_pretty(&value)
            .map_err(|e| BridgeError::SerializationError(e.to_string()))
    }) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => tool_error(tool, &e),
    }
}

fn tool_error(tool: &str, error: &BridgeError) -> CallToolResult {
    warn!(tool, error = %error, "tool call failed");
    CallToolResult::error(vec![Content::text(error_message(error))])
}

/// Text shown to the agent for a failed call.
fn error_message(error: &BridgeError) -> String {
    match error {
        BridgeError::ConfigError(message) => message.clone(),
        BridgeError::ApiStatus { detail, .. } => {
            serde_json::json!({ "error": error.to_string(), "detail": detail }).to_string()
        }
        other => other.to_string(),
    }
}
