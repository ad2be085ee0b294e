//! Application layer services implementing business logic.
//!
//! - [`services::link_service::LinkService`] - Short path generation and lookup

pub mod services;
