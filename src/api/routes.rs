//! API route configuration.

use crate::api::handlers::{create_handler, lookup_handler, metrics_handler};
use crate::state::AppState;
use crate::stats::Stats;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

/// Link routes relative to `base_path`.
///
/// # Endpoints
///
/// - `POST <base_path>_create` - Create a short link
/// - `*    <base_path>{short_path}` - Redirect (fallback for every other path)
///
/// Only `POST` reaches the create handler; other methods on `_create` are
/// rejected by the router, while redirects answer any method.
///
/// The create route has no request body limit. `long_url` length is bounded
/// by the configured length limit alone, and is unbounded when that is unset.
pub fn link_routes(base_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{base_path}_create"),
            post(create_handler).layer(DefaultBodyLimit::disable()),
        )
        .fallback(lookup_handler)
}

/// Routes for the metrics listener.
///
/// - `GET /metrics` - Prometheus text exposition of the error counters
pub fn metrics_routes() -> Router<Arc<Stats>> {
    Router::new().route("/metrics", get(metrics_handler))
}
