//! Configuration loading and validation for the flights service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is present but invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated flights service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OTLP collector endpoint shared by the metrics, logging, and tracing
    /// export channels. Cleartext gRPC is acceptable for this service.
    #[serde(default = "default_otlp_endpoint")]
    pub otel_exporter_otlp_endpoint: String,

    /// `service.name` resource attribute.
    #[serde(default = "default_service_name")]
    pub otel_service_name: String,

    /// `service.namespace` resource attribute.
    #[serde(default = "default_service_namespace")]
    pub service_namespace: String,

    /// `deployment.environment` resource attribute.
    #[serde(default = "default_deployment_environment")]
    pub deployment_environment: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// How often (seconds) accumulated counter deltas are exported.
    #[serde(default = "default_metric_export_interval")]
    pub metric_export_interval_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".into()
}
fn default_service_name() -> String {
    "flights".into()
}
fn default_service_namespace() -> String {
    "pov-sim".into()
}
fn default_deployment_environment() -> String {
    "dev".into()
}
fn default_http_port() -> u16 {
    5001
}
fn default_metric_export_interval() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(
            &self.otel_exporter_otlp_endpoint,
            "OTEL_EXPORTER_OTLP_ENDPOINT",
        )?;
        ensure_non_empty(&self.otel_service_name, "OTEL_SERVICE_NAME")?;
        ensure_non_empty(&self.service_namespace, "SERVICE_NAMESPACE")?;

        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must be a non-zero port");
        }
        if self.metric_export_interval_secs == 0 {
            anyhow::bail!("METRIC_EXPORT_INTERVAL_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
