//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "inclusive-board";

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "inclusive-board-otlp.json";

static TRACE_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Installs the global subscriber once and returns the trace file path.
///
/// The level comes from `config.trace_level` (default `info`) and accepts any
/// `EnvFilter` directive. Returns `None` when the data directory cannot be
/// created or another subscriber was already installed; the crate then runs
/// without trace export. Later calls return the first call's result.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    TRACE_FILE
        .get_or_init(|| install(config))
        .clone()
}

fn install(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    std::fs::create_dir_all(&config.data_dir).ok()?;
    let trace_file = config.data_dir.join(TRACE_FILE_NAME);

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::file_tracer_provider(trace_file.clone(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
