//! Currency catalogue tool.

use serde_json::Value;
use tracing::instrument;

use crate::{client::InfiniClient, error::Result, signing::Clock, transport::Transport};

/// Lists the cryptocurrencies orders can be created in.
///
/// # Errors
///
/// Returns any error from [`InfiniClient::request`].
#[instrument(skip(client))]
pub async fn get_supported_currencies<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
) -> Result<Value> {
    client.get("/currency", &[]).await
}
