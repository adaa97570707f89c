//! Bridge from `tracing` events into exportable OTEL log records.
//!
//! Registered on the process-wide subscriber, so every log statement in the
//! process — request-correlated or not — is captured once and handed to the
//! logging pipeline's batch processor. When the event fires inside an active
//! span, the record is stamped with that span's trace and span identifiers.
//!
//! The bridge never returns an error to the caller of a log statement; export
//! failures are reported by the SDK through its stderr fallback handler.

use std::fmt;
use std::time::SystemTime;

use opentelemetry::logs::{AnyValue, LogRecord, Logger as _, LoggerProvider as _, Severity};
use opentelemetry::trace::TraceContextExt;
use opentelemetry::Key;
use opentelemetry_sdk::logs::{Logger, LoggerProvider};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// `tracing-subscriber` layer that emits one OTEL log record per event.
pub struct OtelLogBridge {
    logger: Logger,
}

impl OtelLogBridge {
    /// Create a bridge emitting through `provider`'s batch processor.
    pub fn new(provider: &LoggerProvider) -> Self {
        Self {
            logger: provider.logger("flights"),
        }
    }
}

impl<S> Layer<S> for OtelLogBridge
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Events raised by the export path itself must not re-enter the
        // pipeline; they stay on the stderr fallback channel.
        if is_export_path(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut attributes = visitor.attributes;
        attributes.push((Key::new("target"), metadata.target().to_owned().into()));

        let mut builder = LogRecord::builder()
            .with_timestamp(SystemTime::now())
            .with_observed_timestamp(SystemTime::now())
            .with_severity_number(severity_of(metadata.level()))
            .with_severity_text(metadata.level().as_str())
            .with_attributes(attributes);

        if let Some(message) = visitor.message {
            builder = builder.with_body(AnyValue::from(message));
        }

        // Correlation: stamp the record with the active span, if any. The
        // active span lives in the per-request execution context, so
        // concurrent requests each see their own identifiers.
        let otel_ctx = tracing::Span::current().context();
        let span_context = otel_ctx.span().span_context().clone();
        if span_context.is_valid() {
            builder = builder.with_span_context(&span_context);
        }

        self.logger.emit(builder.build());
    }
}

fn is_export_path(target: &str) -> bool {
    target.starts_with("opentelemetry")
        || target.starts_with("tonic")
        || target.starts_with("h2")
        || target.starts_with("hyper")
}

const fn severity_of(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warn,
        Level::INFO => Severity::Info,
        Level::DEBUG => Severity::Debug,
        Level::TRACE => Severity::Trace,
    }
}

/// Collects the event message and structured fields into OTEL attributes.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    attributes: Vec<(Key, AnyValue)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: AnyValue) {
        self.attributes.push((Key::new(field.name()), value));
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push(field, format!("{value:?}").into());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.push(field, value.to_owned().into());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, (value as i64).into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::testing::logs::InMemoryLogsExporter;
    use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn severity_mapping() {
        assert_eq!(severity_of(&Level::ERROR), Severity::Error);
        assert_eq!(severity_of(&Level::WARN), Severity::Warn);
        assert_eq!(severity_of(&Level::INFO), Severity::Info);
        assert_eq!(severity_of(&Level::DEBUG), Severity::Debug);
        assert_eq!(severity_of(&Level::TRACE), Severity::Trace);
    }

    #[test]
    fn export_path_targets_are_skipped() {
        assert!(is_export_path("opentelemetry_sdk::export"));
        assert!(is_export_path("tonic::transport"));
        assert!(is_export_path("h2::codec"));
        assert!(!is_export_path("flights::server"));
    }

    #[test]
    fn log_inside_span_carries_its_identifiers() {
        let span_exporter = InMemorySpanExporter::default();
        let tracer_provider = TracerProvider::builder()
            .with_simple_exporter(span_exporter.clone())
            .build();
        let logs_exporter = InMemoryLogsExporter::default();
        let logger_provider = LoggerProvider::builder()
            .with_simple_exporter(logs_exporter.clone())
            .build();

        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer("test")))
            .with(OtelLogBridge::new(&logger_provider));
        let _guard = tracing::subscriber::set_default(subscriber);

        {
            let span = tracing::info_span!("request");
            span.in_scope(|| tracing::error!(status = 500_u16, "intentionally raising 500 error"));
        }

        for r in tracer_provider.force_flush() {
            r.unwrap();
        }
        let spans = span_exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        let logs = logs_exporter.get_emitted_logs().unwrap();
        let record = &logs
            .iter()
            .find(|l| {
                matches!(
                    &l.record.severity_number,
                    Some(Severity::Error)
                )
            })
            .expect("error log not captured")
            .record;

        let trace_ctx = record
            .trace_context
            .as_ref()
            .expect("log record missing trace context");
        assert_eq!(trace_ctx.trace_id, spans[0].span_context.trace_id());
        assert_eq!(trace_ctx.span_id, spans[0].span_context.span_id());
    }

    #[test]
    fn log_outside_span_has_no_trace_context() {
        let logs_exporter = InMemoryLogsExporter::default();
        let logger_provider = LoggerProvider::builder()
            .with_simple_exporter(logs_exporter.clone())
            .build();

        let subscriber =
            tracing_subscriber::registry().with(OtelLogBridge::new(&logger_provider));
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!("operational log with no active request");

        let logs = logs_exporter.get_emitted_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].record.trace_context.is_none());
    }

    #[test]
    fn message_and_fields_are_captured() {
        let logs_exporter = InMemoryLogsExporter::default();
        let logger_provider = LoggerProvider::builder()
            .with_simple_exporter(logs_exporter.clone())
            .build();

        let subscriber =
            tracing_subscriber::registry().with(OtelLogBridge::new(&logger_provider));
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!(flight = 123_u32, airline = "AA", "generated flight");

        let logs = logs_exporter.get_emitted_logs().unwrap();
        let record = &logs[0].record;
        assert_eq!(record.body, Some(AnyValue::from("generated flight".to_owned())));
        let attrs = record.attributes.as_ref().expect("attributes missing");
        assert!(attrs
            .iter()
            .any(|(k, v)| k.as_str() == "airline" && *v == AnyValue::from("AA".to_owned())));
        assert!(attrs
            .iter()
            .any(|(k, v)| k.as_str() == "flight" && *v == AnyValue::from(123_i64)));
    }
}
