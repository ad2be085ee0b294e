//! Response headers set on every link endpoint response.
//!
//! All responses are declared as JSON and carry permissive CORS headers so
//! arbitrary sites can call the API.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

fn overriding(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Adds `Content-Type: application/json` and the CORS headers to every
/// response of `router`, including its fallback.
pub fn apply(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(overriding(header::CONTENT_TYPE, "application/json"))
            .layer(overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN))
            .layer(overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS))
            .layer(overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)),
    )
}
