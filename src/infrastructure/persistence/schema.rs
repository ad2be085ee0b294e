//! Table creation for the `links` and `follows` tables.

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS links(
        id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
        short_path TEXT NOT NULL UNIQUE,
        long_url TEXT NOT NULL,
        create_ts BIGINT NOT NULL,
        create_ip TEXT NOT NULL,
        create_forwarded_for TEXT
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS links_short_path ON links(short_path)",
    r#"
    CREATE TABLE IF NOT EXISTS follows(
        id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
        short_path TEXT NOT NULL,
        ts BIGINT NOT NULL,
        ip TEXT NOT NULL,
        forwarded_for TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS follows_short_path ON follows(short_path)",
];

/// Creates the tables and indexes if they are absent.
///
/// Safe to run on every startup.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for &statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!("Schema ready");
    Ok(())
}
