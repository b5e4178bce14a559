//! Logging and OpenTelemetry initialization for the catalog server
//!
//! The subscriber is assembled from boxed layers: a console layer, an
//! optional rolling-file layer and an optional OTLP span exporter, all behind
//! one `EnvFilter`. `RUST_LOG` overrides the configured level.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{Config as TraceConfig, Sampler, TracerProvider},
    Resource,
};
use std::time::Duration;
use tracing_appender::{non_blocking::WorkerGuard, rolling::RollingFileAppender, rolling::Rotation};
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{LogRotation, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file writer flushing and shuts the exporter down on drop.
pub struct TelemetryGuard {
    _file_guard: Option<WorkerGuard>,
    exporting: bool,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if self.exporting {
            global::shutdown_tracer_provider();
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// A failing OTLP exporter is logged and skipped; the server still starts with
/// console (and file) output.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<TelemetryGuard> {
    let mut layers: Vec<BoxedLayer> = vec![output_layer(
        config.json,
        BoxMakeWriter::new(std::io::stdout),
        true,
    )];

    let file_guard = if config.file_enabled {
        std::fs::create_dir_all(&config.file_directory)?;
        let appender = RollingFileAppender::new(
            rotation(config.file_rotation),
            &config.file_directory,
            file_name(config),
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(output_layer(config.json, BoxMakeWriter::new(writer), false));
        Some(guard)
    } else {
        None
    };

    let (provider, otel_error) = if config.opentelemetry_enabled {
        match tracer_provider(config) {
            Ok(provider) => (Some(provider), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    let exporting = provider.is_some();
    if let Some(provider) = provider {
        let tracer = provider.tracer(config.service_name.clone());
        layers.push(
            tracing_opentelemetry::layer()
                .with_tracer(tracer)
                .with_tracked_inactivity(true)
                .boxed(),
        );
        global::set_tracer_provider(provider);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(&config.level))
        .try_init()?;

    if let Some(err) = otel_error {
        tracing::warn!(error = %err, "OTLP exporter unavailable, continuing without trace export");
    }

    tracing::info!(
        json = config.json,
        file = config.file_enabled,
        otel_enabled = exporting,
        service_name = %config.service_name,
        environment = %config.deployment_environment,
        "Logging initialized"
    );

    Ok(TelemetryGuard {
        _file_guard: file_guard,
        exporting,
    })
}

fn output_layer(json: bool, writer: BoxMakeWriter, ansi: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Library and binary both log under the `catalog` prefix; sqlx stays quiet.
fn default_directives(level: &str) -> String {
    format!("catalog={level},catalog_server={level},tower_http=info,sqlx=warn")
}

fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Never => Rotation::NEVER,
    }
}

/// Rolling files get a date suffix; a never-rotating file needs its own extension.
fn file_name(config: &LoggingConfig) -> String {
    match config.file_rotation {
        LogRotation::Never => format!("{}.log", config.file_prefix),
        _ => config.file_prefix.clone(),
    }
}

fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
    }
}

fn tracer_provider(config: &LoggingConfig) -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(&config.otlp_endpoint)
        .with_timeout(Duration::from_secs(config.otlp_timeout_seconds))
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to create OTLP exporter: {e}"))?;

    let version = config
        .service_version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", version),
        KeyValue::new("deployment.environment", config.deployment_environment.clone()),
    ]);

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_config(
            TraceConfig::default()
                .with_sampler(sampler(config.trace_sample_ratio))
                .with_resource(resource),
        )
        .build())
}
