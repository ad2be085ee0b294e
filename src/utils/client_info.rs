//! Client metadata extracted from request headers.

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Returns the raw `X-Forwarded-For` header, or an empty string.
///
/// The value is stored as sent; it is never parsed or trusted.
pub fn forwarded_for(headers: &HeaderMap) -> String {
    headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
