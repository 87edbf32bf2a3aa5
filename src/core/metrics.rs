use std::sync::OnceLock;
use std::time::Duration;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;
use crate::repositories::statistics::Counter;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    if PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    tracing::info!("Prometheus recorder installed");
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_http_response(status: StatusCode, latency: Duration) {
    let status_label = status.as_u16().to_string();
    metrics::counter!("http_requests_total", "status" => status_label.clone()).increment(1);
    metrics::histogram!("http_request_duration_seconds", "status" => status_label)
        .record(latency.as_secs_f64());
}

/// Mirrors a dashboard counter bump into the Prometheus registry.
pub(crate) fn record_learning_event(counter: Counter) {
    metrics::counter!("learning_events_total", "event" => counter.label()).increment(1);
}

pub(crate) fn record_test_score(score: f64, max_score: i32) {
    if max_score > 0 {
        metrics::histogram!("test_score_ratio").record(score / f64::from(max_score));
    }
}
