//! Prometheus metrics for the diagram service.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

struct ServiceMetrics {
    registry: Registry,
    request_counter: IntCounterVec,
    request_duration: Histogram,
    error_counter: IntCounterVec,
    render_failures: IntCounterVec,
    active_sessions: IntGauge,
}

static METRICS: OnceLock<ServiceMetrics> = OnceLock::new();

#[allow(clippy::expect_used)] // Static metric creation cannot fail with valid options
fn get_or_init_metrics() -> &'static ServiceMetrics {
    METRICS.get_or_init(|| {
        let registry = Registry::new();

        let request_counter = IntCounterVec::new(
            Opts::new(
                "archflow_requests_total",
                "Total number of HTTP requests by endpoint and status",
            ),
            &["endpoint", "status"],
        )
        .expect("Failed to create request_counter");

        let request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "archflow_request_duration_seconds",
                "Request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0,
            ]),
        )
        .expect("Failed to create request_duration");

        let error_counter = IntCounterVec::new(
            Opts::new(
                "archflow_errors_total",
                "Total number of errors by kind and endpoint",
            ),
            &["kind", "endpoint"],
        )
        .expect("Failed to create error_counter");

        let render_failures = IntCounterVec::new(
            Opts::new(
                "archflow_render_failures_total",
                "Renderer subprocess failures by reason",
            ),
            &["reason"],
        )
        .expect("Failed to create render_failures");

        let active_sessions = IntGauge::new(
            "archflow_active_sessions",
            "Sessions currently held by the session store",
        )
        .expect("Failed to create active_sessions");

        let register = |collector: Box<dyn prometheus::core::Collector>, name: &'static str| {
            if let Err(err) = registry.register(collector) {
                if !matches!(err, prometheus::Error::AlreadyReg) {
                    tracing::warn!(metric = name, error = %err, "failed to register metric");
                }
            }
        };
        register(Box::new(request_counter.clone()), "archflow_requests_total");
        register(
            Box::new(request_duration.clone()),
            "archflow_request_duration_seconds",
        );
        register(Box::new(error_counter.clone()), "archflow_errors_total");
        register(
            Box::new(render_failures.clone()),
            "archflow_render_failures_total",
        );
        register(Box::new(active_sessions.clone()), "archflow_active_sessions");

        ServiceMetrics {
            registry,
            request_counter,
            request_duration,
            error_counter,
            render_failures,
            active_sessions,
        }
    })
}

/// Record a completed request.
pub fn record_request(endpoint: &str, status: u16, duration_seconds: f64) {
    let metrics = get_or_init_metrics();
    let status_class = if status < 400 { "success" } else { "error" };
    metrics
        .request_counter
        .with_label_values(&[endpoint, status_class])
        .inc();
    metrics.request_duration.observe(duration_seconds);
}

/// Record an error by taxonomy kind.
pub fn record_error(endpoint: &str, kind: &str) {
    get_or_init_metrics()
        .error_counter
        .with_label_values(&[kind, endpoint])
        .inc();
}

/// Record a renderer failure.
pub fn record_render_failure(reason: &str) {
    get_or_init_metrics()
        .render_failures
        .with_label_values(&[reason])
        .inc();
}

/// Track the live session count.
pub fn set_active_sessions(count: usize) {
    let clamped = i64::try_from(count).unwrap_or(i64::MAX);
    get_or_init_metrics().active_sessions.set(clamped);
}

/// Export all service metrics in Prometheus text format.
///
/// # Errors
///
/// When encoding fails, which indicates a prometheus library bug.
pub fn export() -> Result<String, String> {
    let metrics = get_or_init_metrics();
    let encoder = TextEncoder::new();
    let families = metrics.registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| format!("failed to encode metrics: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics are not utf-8: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_export_contains_families() {
        record_request("generate-diagram", 200, 0.5);
        record_error("generate-diagram", "validation_error");
        record_render_failure("timeout");
        set_active_sessions(3);

        let exported = export().unwrap();
        assert!(exported.contains("# HELP"));
        assert!(exported.contains("archflow_requests_total"));
        assert!(exported.contains("archflow_errors_total"));
        assert!(exported.contains("archflow_render_failures_total"));
        assert!(exported.contains("archflow_active_sessions"));
    }

    #[test]
    fn test_status_classes() {
        record_request("health", 200, 0.001);
        record_request("health", 404, 0.001);
        let exported = export().unwrap();
        assert!(exported.contains("success"));
        assert!(exported.contains("error"));
    }
}
