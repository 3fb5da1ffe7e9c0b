//! Prometheus metrics: the HTTP request middleware, the `/metrics` app and
//! counters for session and messaging events.
//!
//! Everything here is a no-op when `OBSERVABILITY_ENABLED` is `false` or `0`.

use anyhow::Context;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use schooldesk_models::UserType;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and its upkeep task. `Ok(None)` when
/// observability is disabled.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .context("Failed to set latency buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_session_created(user_type: UserType) {
    if !is_observability_enabled() {
        return;
    }
    counter!("sessions_created_total", "user_type" => user_type.as_str()).increment(1);
}

pub fn track_session_destroyed() {
    if !is_observability_enabled() {
        return;
    }
    counter!("sessions_destroyed_total").increment(1);
}

pub fn track_login_success(user_type: UserType) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "user_type" => user_type.as_str(), "status" => "success")
        .increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "user_type" => "unknown", "status" => "failure", "reason" => reason)
        .increment(1);
}

/// A recipient opened an unread message for the first time.
pub fn track_message_read() {
    if !is_observability_enabled() {
        return;
    }
    counter!("messages_read_total").increment(1);
}

pub fn track_message_sent() {
    if !is_observability_enabled() {
        return;
    }
    counter!("messages_sent_total").increment(1);
}

pub fn track_authorization_denied(user_type: UserType) {
    if !is_observability_enabled() {
        return;
    }
    counter!("authorization_checks_total", "user_type" => user_type.as_str(), "status" => "denied")
        .increment(1);
}
