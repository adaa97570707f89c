//! OTEL SDK initialisation: tracing subscriber + OTLP exporters for all
//! three signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use opentelemetry::global;
use opentelemetry::metrics::{Meter, MeterProvider as _};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::LoggerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::Tracer;
use opentelemetry_sdk::{runtime, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::telemetry::bridge::OtelLogBridge;
use crate::telemetry::resource::service_resource;

static INITIALISED: AtomicBool = AtomicBool::new(false);

/// Handle over the process-wide telemetry pipelines.
///
/// Constructed exactly once at startup by [`init`] and passed to the layers
/// that need it, instead of being reached through implicit globals. Dropping
/// the handle does not flush; call [`Telemetry::shutdown`] on exit.
#[derive(Debug)]
pub struct Telemetry {
    meter_provider: SdkMeterProvider,
    logger_provider: LoggerProvider,
}

impl Telemetry {
    /// Meter for registering request instruments.
    pub fn meter(&self) -> Meter {
        self.meter_provider.meter("flights")
    }

    /// Best-effort flush of all pending batches before process exit.
    ///
    /// Flush failures are reported on stderr and are not fatal.
    pub fn shutdown(mut self) {
        global::shutdown_tracer_provider();
        if let Err(e) = self.meter_provider.shutdown() {
            eprintln!("WARN: failed to flush metrics on shutdown: {e}");
        }
        let _ = self.logger_provider.shutdown();
    }
}

/// Initialise the global tracing subscriber and the OTLP pipelines.
///
/// Configures:
/// - A JSON-formatted [`tracing_subscriber`] layer for local structured output.
/// - A [`tracing_opentelemetry`] layer exporting one span per request.
/// - An [`OtelLogBridge`] layer exporting every log statement, correlated
///   with the active span.
/// - An OTLP metrics pipeline with a periodic exporting reader.
///
/// All three signals share the same [`Resource`] and collector endpoint.
///
/// # Errors
///
/// Returns an error if any pipeline cannot be initialised, or if telemetry
/// was already initialised in this process. Double initialisation is a
/// programming error and fails loudly rather than registering a second set
/// of exporters.
pub fn init(cfg: &Config) -> Result<Telemetry> {
    if INITIALISED.swap(true, Ordering::SeqCst) {
        anyhow::bail!("telemetry pipelines already initialised");
    }

    let resource = service_resource(cfg);
    let endpoint = cfg.otel_exporter_otlp_endpoint.as_str();

    let meter_provider = init_metrics(
        endpoint,
        Duration::from_secs(cfg.metric_export_interval_secs),
        resource.clone(),
    )?;
    let logger_provider = init_logs(endpoint, resource.clone())?;
    let tracer = init_tracer(endpoint, resource)?;

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let log_bridge = OtelLogBridge::new(&logger_provider);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .with(log_bridge)
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(Telemetry {
        meter_provider,
        logger_provider,
    })
}

/// Metrics pipeline: periodic batched export of accumulated counter deltas.
///
/// Export runs on its own Tokio task; a failed export drops the batch and is
/// diagnosed through the OTEL global error handler, never the request path.
fn init_metrics(
    endpoint: &str,
    interval: Duration,
    resource: Resource,
) -> Result<SdkMeterProvider> {
    opentelemetry_otlp::new_pipeline()
        .metrics(runtime::Tokio)
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_resource(resource)
        .with_period(interval)
        .build()
        .context("failed to install OTLP metrics pipeline")
}

/// Logging pipeline: batch log record processor over the OTLP channel.
fn init_logs(endpoint: &str, resource: Resource) -> Result<LoggerProvider> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .build_log_exporter()
        .context("failed to build OTLP log exporter")?;

    Ok(LoggerProvider::builder()
        .with_config(opentelemetry_sdk::logs::Config::default().with_resource(resource))
        .with_batch_exporter(exporter, runtime::Tokio)
        .build())
}

/// Tracing pipeline: batch span processor over the OTLP channel.
fn init_tracer(endpoint: &str, resource: Resource) -> Result<Tracer> {
    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default().with_resource(resource),
        )
        .install_batch(runtime::Tokio)
        .context("failed to install OTLP tracing pipeline")
}
