use anyhow::Result;
use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    runtime::Tokio,
    trace::TracerProvider,
    Resource,
};
use std::time::Duration;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Keeps the span exporter alive until [`Telemetry::shutdown`] flushes it.
#[derive(Debug, Default)]
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    #[must_use]
    pub fn exporting(&self) -> bool {
        self.provider.is_some()
    }

    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                error!("Error shutting down tracer provider: {}", e);
            }
        }
    }
}

fn init_tracer(endpoint: &str) -> Result<TracerProvider> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(3))
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_resource(Resource::new(vec![
            KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    Ok(provider)
}

/// Install the global subscriber: fmt to stderr, `RUST_LOG` over the verbosity
/// default, plus OTLP span export when `otlp_endpoint` is set. Must run inside a
/// tokio runtime when exporting.
///
/// # Errors
/// Returns an error if the exporter cannot be built or a global subscriber is
/// already installed.
pub fn init(verbosity_level: Level, otlp_endpoint: Option<&str>) -> Result<Telemetry> {
    let provider = otlp_endpoint.map(init_tracer).transpose()?;

    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(env!("CARGO_PKG_NAME")))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(otel_layer)
        .with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(endpoint) = otlp_endpoint {
        debug!("exporting spans to {}", endpoint);
    }

    Ok(Telemetry { provider })
}
