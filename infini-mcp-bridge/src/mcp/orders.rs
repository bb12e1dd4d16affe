//! Payment order tools.
//!
//! Create, fetch, list and re-tokenize Infini checkout orders.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    client::InfiniClient,
    error::{BridgeError, Result},
    mcp::{
        models::{
            CreateOrderRequest, CreatePaymentOrderParams, GetPaymentOrderParams,
            ListPaymentOrdersParams, OrderIdRequest, ReissueOrderTokenParams,
        },
        non_empty, require,
    },
    signing::Clock,
    transport::Transport,
};

/// Creates a payment order and returns the provider's response.
///
/// Optional fields that are absent or empty are left out of the body;
/// `expires_in` is always sent.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `request_id` or `amount` is empty,
/// or any error from [`InfiniClient::request`].
///
/// # Examples
///
/// ```no_run
/// use infini_mcp_bridge::{
///     InfiniClient, InfiniConfig,
///     mcp::{CreatePaymentOrderParams, create_payment_order},
/// };
///
/// # async fn example() -> infini_mcp_bridge::error::Result<()> {
/// let client = InfiniClient::new(&InfiniConfig::from_env()?)?;
/// let params = CreatePaymentOrderParams {
///     request_id: "9f0c8a52-0c5e-4bb0-9a6e-1f0d0d2e6f11".into(),
///     amount: "100.00".into(),
///     order_desc: Some("Annual plan".into()),
///     ..Default::default()
/// };
///
/// let order = create_payment_order(&client, params).await?;
/// println!("{order}");
/// # Ok(())
/// # }
/// ```
#[instrument(skip(client, params), fields(request_id = %params.request_id))]
pub async fn create_payment_order<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: CreatePaymentOrderParams,
) -> Result<Value> {
    require("request_id", &params.request_id)?;
    require("amount", &params.amount)?;
    info!("creating payment order");

    let body = CreateOrderRequest {
        request_id: params.request_id,
        amount: params.amount,
        client_reference: non_empty(params.client_reference),
        order_desc: non_empty(params.order_desc),
        merchant_alias: non_empty(params.merchant_alias),
        expires_in: params.expires_in,
        success_url: non_empty(params.success_url),
        failure_url: non_empty(params.failure_url),
    };

    client.post("/order", &body).await
}

/// Fetches one payment order.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `order_id` is empty, or any error
/// from [`InfiniClient::request`].
#[instrument(skip(client, params), fields(order_id = %params.order_id))]
pub async fn get_payment_order<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: GetPaymentOrderParams,
) -> Result<Value> {
    require("order_id", &params.order_id)?;
    client.get("/order", &[("order_id", params.order_id.as_str())]).await
}

/// Lists payment orders, optionally filtered by currency and status.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `page` or `page_size` is zero, or
/// any error from [`InfiniClient::request`].
#[instrument(skip(client, params), fields(page = params.page, page_size = params.page_size))]
pub async fn list_payment_orders<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: ListPaymentOrdersParams,
) -> Result<Value> {
    if params.page == 0 {
        return Err(BridgeError::InvalidInput("page must be at least 1".to_owned()));
    }
    if params.page_size == 0 {
        return Err(BridgeError::InvalidInput("page_size must be at least 1".to_owned()));
    }

    let page = params.page.to_string();
    let page_size = params.page_size.to_string();
    let currency = non_empty(params.currency);
    let status = non_empty(params.status);

    let mut query = vec![("page", page.as_str()), ("page_size", page_size.as_str())];
    if let Some(currency) = &currency {
        query.push(("currency", currency.as_str()));
    }
    if let Some(status) = &status {
        query.push(("status", status.as_str()));
    }

    client.get("/order/list", &query).await
}

/// Reissues the checkout URL token for an existing order.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `order_id` is empty, or any error
/// from [`InfiniClient::request`].
#[instrument(skip(client, params), fields(order_id = %params.order_id))]
pub async fn reissue_order_token<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: ReissueOrderTokenParams,
) -> Result<Value> {
    require("order_id", &params.order_id)?;
    client.post("/order/token/reissue", &OrderIdRequest { order_id: &params.order_id }).await
}
