//! Fund withdrawal tool.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    client::InfiniClient,
    error::Result,
    mcp::{
        models::{WithdrawFundsParams, WithdrawRequest},
        non_empty, require,
    },
    signing::Clock,
    transport::Transport,
};

/// Withdraws funds to an external wallet.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`](crate::error::BridgeError::InvalidInput)
/// if `chain`, `token_type`, `amount` or `wallet_address` is empty, or any
/// error from [`InfiniClient::request`].
#[instrument(skip(client, params), fields(chain = %params.chain, token_type = %params.token_type))]
pub async fn withdraw_funds<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: WithdrawFundsParams,
) -> Result<Value> {
    require("chain", &params.chain)?;
    require("token_type", &params.token_type)?;
    require("amount", &params.amount)?;
    require("wallet_address", &params.wallet_address)?;
    info!("submitting withdrawal");

    let body = WithdrawRequest {
        chain: params.chain,
        token_type: params.token_type,
        amount: params.amount,
        wallet_address: params.wallet_address,
        note: non_empty(params.note),
    };

    client.post("/fund/withdraw", &body).await
}
