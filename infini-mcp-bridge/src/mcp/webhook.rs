//! Webhook verification tool.
//!
//! Runs locally; no request is sent to Infini.

use tracing::instrument;

use crate::{
    client::InfiniClient,
    error::Result,
    mcp::models::{VerifyWebhookParams, WebhookVerification},
    signing::Clock,
    transport::Transport,
};

/// Verifies a webhook body and signature.
///
/// Uses `params.webhook_secret` when given, else the client's configured
/// webhook secret.
///
/// # Errors
///
/// Returns [`BridgeError::ConfigError`](crate::error::BridgeError::ConfigError)
/// when no secret is available and
/// [`BridgeError::InvalidInput`](crate::error::BridgeError::InvalidInput) for
/// a malformed timestamp. A mismatch is reported as `verified: false`.
#[instrument(skip(client, params), fields(body_len = params.body.len()))]
pub fn verify_webhook_signature<T: Transport, C: Clock>(
    client: &InfiniClient<T, C>,
    params: &VerifyWebhookParams,
) -> Result<WebhookVerification> {
    let verified = client.verify_webhook(
        params.body.as_bytes(),
        &params.timestamp,
        &params.signature,
        params.webhook_secret.as_deref(),
    )?;
    Ok(WebhookVerification { verified })
}
