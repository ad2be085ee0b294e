//! Handler for the Prometheus metrics endpoint.

use axum::{extract::State, http::header, response::IntoResponse};
use std::sync::Arc;

use crate::stats::Stats;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders the error counters.
///
/// # Endpoint
///
/// `GET /metrics` on the metrics listener
///
/// # Response
///
/// ```text
/// # HELP random_error_count Counts number of errors encountered when trying to generate secure random numbers
/// # TYPE random_error_count counter
/// random_error_count 0
/// ...
/// ```
pub async fn metrics_handler(State(stats): State<Arc<Stats>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        stats.render_prometheus(),
    )
}
