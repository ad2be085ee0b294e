//! HTTP middleware for response headers and observability.

pub mod headers;
pub mod tracing;
