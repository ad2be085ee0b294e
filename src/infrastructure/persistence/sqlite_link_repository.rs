//! SQLite implementation of link repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;

/// SQLite repository for link reservation and lookup.
///
/// Uniqueness of `short_path` is enforced by the table's unique index, so a
/// duplicate insert surfaces as [`StoreError::UniqueViolation`].
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_path: String,
    long_url: String,
    create_ts: i64,
    create_ip: String,
    create_forwarded_for: Option<String>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.short_path,
            r.long_url,
            r.create_ts,
            r.create_ip,
            r.create_forwarded_for.unwrap_or_default(),
        )
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO links (short_path, long_url, create_ts, create_ip, create_forwarded_for)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new_link.short_path)
        .bind(&new_link.long_url)
        .bind(new_link.create_ts)
        .bind(&new_link.create_ip)
        .bind(&new_link.create_forwarded_for)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_short_path(&self, short_path: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_path, long_url, create_ts, create_ip, create_forwarded_for
            FROM links
            WHERE short_path = ?1
            "#,
        )
        .bind(short_path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
