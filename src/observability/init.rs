//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every journal line.
const SERVICE_NAME: &str = "Reelfinder";

/// File name of the live journal inside the data directory.
pub const JOURNAL_FILE: &str = "reelfinder-spans.jsonl";

/// Installs the global subscriber: an `EnvFilter` built from `trace_level` (default
/// `info`) in front of an OpenTelemetry layer that writes to the span journal.
///
/// Observability is optional. If the data directory cannot be created the plugin runs
/// without a subscriber. Calling this twice keeps the first subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = tracer::create_tracer_provider(data_dir.join(JOURNAL_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
