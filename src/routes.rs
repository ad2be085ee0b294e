//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST <base-path>_create`     - Create a short link
//! - `GET  <base-path><short_path>` - Redirect to the long URL
//! - `GET  /metrics`                - Prometheus counters (separate listener)
//!
//! # Middleware
//!
//! - **Headers** - JSON content type and permissive CORS on every link response
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::middleware::{headers, tracing};
use crate::state::AppState;
use crate::stats::Stats;
use axum::Router;
use std::sync::Arc;

/// Constructs the link router served on the main listener.
pub fn app_router(state: AppState) -> Router {
    let base_path = state.settings.base_path().to_string();

    let router = api::routes::link_routes(&base_path).with_state(state);

    headers::apply(router).layer(tracing::layer())
}

/// Constructs the router served on the optional metrics listener.
pub fn metrics_router(stats: Arc<Stats>) -> Router {
    api::routes::metrics_routes()
        .with_state(stats)
        .layer(tracing::layer())
}
