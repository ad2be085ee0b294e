//! Helper functions used across the application.
//!
//! - [`short_path`] - Random short path generation
//! - [`client_info`] - Client metadata from HTTP headers

pub mod client_info;
pub mod short_path;
