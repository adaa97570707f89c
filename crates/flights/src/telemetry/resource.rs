//! Static service identity attached to all emitted telemetry.

use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource;

use crate::config::Config;

/// Build the immutable [`Resource`] shared by the metrics, logging, and
/// tracing pipelines.
///
/// Created once at startup and cloned into each pipeline at construction
/// time; never mutated afterwards.
pub fn service_resource(cfg: &Config) -> Resource {
    Resource::new(vec![
        KeyValue::new(resource::SERVICE_NAME, cfg.otel_service_name.clone()),
        KeyValue::new(resource::SERVICE_NAMESPACE, cfg.service_namespace.clone()),
        KeyValue::new(
            resource::DEPLOYMENT_ENVIRONMENT,
            cfg.deployment_environment.clone(),
        ),
        KeyValue::new(resource::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ])
}
