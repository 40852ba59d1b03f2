use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Request logging, installed outside the router so fallback, 405 and
/// panic responses are logged too. Routing has not run yet, so the path is
/// the raw request path.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status,
            latency_ms = %latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status,
            latency_ms = %latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status,
            latency_ms = %latency_ms,
            "Request completed"
        ),
    }

    response
}

/// Default filter when `RUST_LOG` is unset, at `LOG_LEVEL` for this crate.
fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "{name}={level},taskhub_auth={level},taskhub_db={level},tower_http=warn,axum::rejection=trace",
        name = env!("CARGO_CRATE_NAME"),
    ))
}

/// Installs the global subscriber: compact console output plus daily
/// rolling text and JSON files under `LOG_DIR` (default `logs`).
pub fn init_tracing() -> anyhow::Result<()> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    fs::create_dir_all(Path::new(&log_dir))
        .with_context(|| format!("Failed to create log directory {}", log_dir))?;

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "taskhub.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_ansi(false)
        .with_filter(default_filter(&level));

    // Structured copy for log shippers
    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "taskhub.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(default_filter(&level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
