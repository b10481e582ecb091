//! Tracing subscriber setup.

use super::exporter;
use super::file_writer::RotatingFile;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "cinedex";

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "cinedex-otlp.json";

/// Default filter directive when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` built from the configured
/// `trace_level` and an OpenTelemetry layer exporting to
/// `<data_dir>/cinedex-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created the plugin
/// runs without a subscriber; a second call is a no-op.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("catalog.url", config.catalog_url.clone()),
    ]);

    let sink = RotatingFile::new(data_dir.join(TRACE_FILE_NAME));
    let provider = exporter::tracer_provider(sink, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));
    opentelemetry::global::set_tracer_provider(provider);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();

    tracing::debug!(level, "tracing initialized");
}
