//! # Smallifier
//!
//! A small URL shortener built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, and the follow recorder
//! - **Application Layer** ([`application`]) - Short path generation and link lookup
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite repositories and schema
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 8-character short paths (6 random bytes, base64url)
//! - Collision-safe creation through the store's unique constraint
//! - Follow logging on a bounded background queue with backpressure
//! - Error counters exposed in Prometheus text format
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="https://mtrx.to/"
//! export SECRET="change-me"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables and CLI flags
//! via [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod stats;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{Follow, Link, NewFollow, NewLink};
    pub use crate::domain::follow_event::FollowEvent;
    pub use crate::domain::follow_recorder::{FollowRecorder, FollowWorker};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, Settings};
    pub use crate::stats::Stats;
}
