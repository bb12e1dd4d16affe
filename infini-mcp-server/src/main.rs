//! Infini MCP Server - stdio MCP server for the Infini payment API
//!
//! Exposes payment order, currency, withdrawal and webhook verification tools
//! to MCP clients such as desktop agents.
//!
//! # Configuration
//!
//! - `INFINI_CONFIG`: path to a TOML configuration file; when unset the
//!   `INFINI_*` environment variables are read instead
//! - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
//! - `RUST_LOG`: log filter (default: `info`)
//!
//! Logs go to stderr; stdout carries the MCP protocol.

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

mod observability;
mod server;

use infini_mcp_bridge::{InfiniClient, InfiniConfig};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{debug, error, info, warn};

use crate::{
    observability::{HealthReport, HealthStatus, LogFormat, init_observability},
    server::InfiniServer,
};

/// Environment variable pointing at a TOML configuration file.
const CONFIG_PATH_ENV: &str = "INFINI_CONFIG";

fn load_config() -> infini_mcp_bridge::Result<InfiniConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => {
            info!(path = %path, "loading configuration file");
            InfiniConfig::from_file(path)
        }
        _ => InfiniConfig::from_env(),
    }
}

fn log_health(report: &HealthReport) {
    if let Ok(json) = report.to_json() {
        debug!(report = %json, "health report");
    }
    for check in &report.checks {
        info!(check = check.name, status = check.status.as_str(), message = %check.message);
    }
    match report.status {
        HealthStatus::Healthy => info!(environment = %report.environment, "configuration healthy"),
        HealthStatus::Degraded => {
            warn!(environment = %report.environment, "configuration degraded");
        }
        HealthStatus::Unhealthy => {
            warn!(environment = %report.environment, "configuration unhealthy; API tools will fail");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_observability(LogFormat::from_env());
    info!(version = env!("CARGO_PKG_VERSION"), "starting infini-mcp-server");

    let config = load_config().inspect_err(|e| error!(error = %e, "invalid configuration"))?;
    log_health(&HealthReport::from_config(&config));

    let client = InfiniClient::new(&config)?;
    let service = InfiniServer::new(client)
        .serve(stdio())
        .await
        .inspect_err(|e| error!(error = %e, "failed to start MCP service"))?;

    service.waiting().await?;
    info!("infini-mcp-server stopped");
    Ok(())
}
