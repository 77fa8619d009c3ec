//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name recorded on every exported span.
const SERVICE_NAME: &str = "Zellidex";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "zellidex-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Spans pass through an [`EnvFilter`] built from `config.trace_level`
/// (default `info`; an unparsable directive also falls back to `info`) and are
/// written to `~/.local/share/zellij/zellidex/zellidex-otlp.json`.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without a subscriber. Calling this twice is harmless; only the
/// first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let filter = build_filter(config.trace_level.as_deref());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

fn build_filter(level: Option<&str>) -> EnvFilter {
    let level = level.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
