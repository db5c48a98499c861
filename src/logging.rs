use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_DIR: &str = "storage/logs";
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Logs one line per request with a fresh request id, at a level chosen by
/// the response status.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4().to_string();

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Server error"
        ),
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Client error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

fn init_tracer(endpoint: String) -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new(
            "environment",
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        ),
    ]);

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
}

/// Installs the global subscriber.
///
/// Console output is always on. Error and JSON log files are written under
/// `log_dir` when it can be created. OTLP export is added only when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_tracing(log_dir: &str) {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,registrar_db=info,tower_http=warn,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let dir_ready = std::fs::create_dir_all(log_dir);

    let (file_layer, json_layer) = match &dir_ready {
        Ok(()) => {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "registrar.log");
            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("error"));

            // Structured logs for ingestion by Loki or similar
            let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "registrar.json");
            let json_layer = fmt::layer()
                .json()
                .with_writer(json_appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new("info"));

            (Some(file_layer), Some(json_layer))
        }
        Err(_) => (None, None),
    };

    let mut otel_error = None;
    let otel_layer = match std::env::var(OTLP_ENDPOINT_VAR) {
        Ok(endpoint) if !endpoint.trim().is_empty() => match init_tracer(endpoint) {
            Ok(tracer) => Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Err(e) => {
                otel_error = Some(e);
                None
            }
        },
        _ => None,
    };
    let otel_enabled = otel_layer.is_some();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .with(otel_layer)
        .init();

    if let Err(e) = dir_ready {
        warn!(log_dir, error = %e, "Could not create log directory, file logging disabled");
    }
    if let Some(e) = otel_error {
        warn!(error = %e, "Failed to initialize OpenTelemetry, continuing with local logging");
    }
    info!(otel_enabled, "Tracing initialized");
}

pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}
