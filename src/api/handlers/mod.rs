//! HTTP request handlers.

pub mod create;
pub mod lookup;
pub mod metrics;

pub use create::create_handler;
pub use lookup::lookup_handler;
pub use metrics::metrics_handler;
