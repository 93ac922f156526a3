//! Observability for the user service.
//!
//! This crate provides:
//! - [`EventPublisher`]: in-memory, switchable domain event log
//! - [`MetricsCollector`]: named counters plus process uptime
//! - [`Recorder`]: both of the above, as handed to domain services
//! - Prometheus export and an Axum middleware for HTTP request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, Recorder};
//!
//! init_metrics();
//!
//! let recorder = Recorder::new();
//! recorder.record("user.created", "users_created", &id, json!({}));
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod collector;
pub mod events;
pub mod middleware;
pub mod recorder;

pub use collector::{MetricsCollector, MetricsSnapshot};
pub use events::{Event, EventPublisher};
pub use middleware::metrics_middleware;
pub use recorder::Recorder;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder once per process.
///
/// Returns `None` if another global recorder was installed first.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            info!("Prometheus metrics recorder initialized");
            register_metric_descriptions();
            Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
        })
        .inspect_err(|e| warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `/metrics`.
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!("users_created", "Users created");
    describe_counter!("users_updated", "Users updated");
    describe_counter!("users_deactivated", "Users soft-deleted");
    describe_counter!("users_deleted", "Users permanently deleted");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_renders_after_init() {
        // Only one global recorder can exist; a None here means another test won the race.
        if init_metrics().is_some() {
            MetricsCollector::new().increment("users_created");
            let body = metrics_handler().await;
            assert!(body.contains("users_created"));
        }
    }
}
