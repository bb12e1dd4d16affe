//! Observability infrastructure for the Infini MCP server.
//!
//! Structured logging to stderr (stdout carries the MCP protocol) and
//! start-up health checks over the loaded configuration.

use std::io;

use infini_mcp_bridge::{Environment, InfiniConfig};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format for development.
    Pretty,
    /// JSON format for log aggregation.
    Json,
}

impl LogFormat {
    /// Determines log format from the `LOG_FORMAT` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())
    }

    /// `json` (any case) selects JSON; anything else is pretty.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") { Self::Json } else { Self::Pretty }
    }
}

/// Initializes structured logging.
///
/// # Environment Variables
///
/// - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
/// - `RUST_LOG`: Log level filter (default: `info`)
pub fn init_observability(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// All checks passed.
    Healthy,
    /// Operational with warnings.
    Degraded,
    /// Signed calls will fail.
    Unhealthy,
}

impl HealthStatus {
    /// Lowercase name used in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }
}

/// Status of one health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCheckStatus {
    /// Check passed.
    Pass,
    /// Check failed.
    Fail,
    /// Degraded but operational.
    Warn,
}

impl HealthCheckStatus {
    /// Lowercase name used in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warn => "warn",
        }
    }
}

/// Individual health check result.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Check name.
    pub name: &'static str,
    /// Check status.
    pub status: HealthCheckStatus,
    /// Details.
    pub message: String,
}

impl HealthCheck {
    fn new(name: &'static str, status: HealthCheckStatus, message: impl Into<String>) -> Self {
        Self { name, status, message: message.into() }
    }

    /// Creates a passing check.
    #[must_use]
    pub fn pass(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, HealthCheckStatus::Pass, message)
    }

    /// Creates a warning check.
    #[must_use]
    pub fn warn(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, HealthCheckStatus::Warn, message)
    }

    /// Creates a failing check.
    #[must_use]
    pub fn fail(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, HealthCheckStatus::Fail, message)
    }
}

/// Health report for the server configuration.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Overall status.
    pub status: HealthStatus,
    /// Server version.
    pub version: &'static str,
    /// Infini environment in use.
    pub environment: Environment,
    /// Individual checks.
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    /// Runs the start-up checks against `config`.
    #[must_use]
    pub fn from_config(config: &InfiniConfig) -> Self {
        let mut checks = Vec::with_capacity(3);

        checks.push(if config.has_credentials() {
            HealthCheck::pass("credentials", "API key and secret configured")
        } else {
            HealthCheck::fail(
                "credentials",
                "INFINI_API_KEY and INFINI_SECRET_KEY must be set for API calls",
            )
        });

        checks.push(match (&config.webhook_secret, &config.api_secret) {
            (Some(_), _) => HealthCheck::pass("webhook_secret", "dedicated webhook secret"),
            (None, Some(_)) => {
                HealthCheck::warn("webhook_secret", "falling back to the API secret")
            }
            (None, None) => HealthCheck::warn(
                "webhook_secret",
                "no secret; webhook verification needs an explicit secret",
            ),
        });

        checks.push(match config.base_url() {
            Ok(url) if config.base_url.is_some() => {
                HealthCheck::warn("endpoint", format!("base URL overridden: {url}"))
            }
            Ok(url) => HealthCheck::pass("endpoint", format!("{} ({url})", config.environment)),
            Err(e) => HealthCheck::fail("endpoint", e.to_string()),
        });

        Self {
            status: Self::compute_status(&checks),
            version: env!("CARGO_PKG_VERSION"),
            environment: config.environment,
            checks,
        }
    }

    /// Serializes the report to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::json!({
            "status": self.status.as_str(),
            "version": self.version,
            "environment": self.environment.as_str(),
            "checks": self.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "status": c.status.as_str(),
                "message": c.message,
            })).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&json)
    }

    /// Determines overall status from individual checks.
    #[must_use]
    pub fn compute_status(checks: &[HealthCheck]) -> HealthStatus {
        if checks.iter().any(|c| c.status == HealthCheckStatus::Fail) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthCheckStatus::Warn) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}
