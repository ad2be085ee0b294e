//! SQLite repository implementations.
//!
//! Queries are checked at runtime with `sqlx::query`, so building the crate
//! does not need a live database.
//!
//! - [`SqliteLinkRepository`] - Link reservation and lookup
//! - [`SqliteFollowRepository`] - Append-only follow log
//! - [`schema::create_tables`] - Idempotent schema creation
//! - [`connect`] - Connection pool setup

pub mod schema;
pub mod sqlite_follow_repository;
pub mod sqlite_link_repository;

pub use schema::create_tables;
pub use sqlite_follow_repository::SqliteFollowRepository;
pub use sqlite_link_repository::SqliteLinkRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::time::Duration;

/// Opens (creating if missing) the SQLite database at `path`.
pub async fn connect(
    path: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}
