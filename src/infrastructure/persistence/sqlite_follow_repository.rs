//! SQLite implementation of the follow log.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Follow, NewFollow};
use crate::domain::repositories::FollowRepository;
use crate::error::StoreError;

/// SQLite repository for the append-only `follows` table.
pub struct SqliteFollowRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteFollowRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FollowRow {
    short_path: String,
    ts: i64,
    ip: String,
    forwarded_for: Option<String>,
}

#[async_trait]
impl FollowRepository for SqliteFollowRepository {
    async fn record(&self, new_follow: NewFollow) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO follows (short_path, ts, ip, forwarded_for)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new_follow.short_path)
        .bind(new_follow.ts)
        .bind(&new_follow.ip)
        .bind(&new_follow.forwarded_for)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_for(&self, short_path: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE short_path = ?1")
            .bind(short_path)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_for(&self, short_path: &str) -> Result<Vec<Follow>, StoreError> {
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT short_path, ts, ip, forwarded_for
            FROM follows
            WHERE short_path = ?1
            ORDER BY id
            "#,
        )
        .bind(short_path)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Follow {
                short_path: r.short_path,
                ts: r.ts,
                ip: r.ip,
                forwarded_for: r.forwarded_for.unwrap_or_default(),
            })
            .collect())
    }
}
