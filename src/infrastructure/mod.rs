//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - SQLite connection, schema, and repository implementations

pub mod persistence;
