#![allow(dead_code)]

use axum::Router;
use axum::extract::connect_info::MockConnectInfo;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

use smallifier::application::services::LinkService;
use smallifier::domain::follow_recorder::{FollowRecorder, FollowWorker};
use smallifier::domain::repositories::FollowRepository;
use smallifier::infrastructure::persistence::{
    self, SqliteFollowRepository, SqliteLinkRepository, create_tables,
};
use smallifier::routes::app_router;
use smallifier::state::{AppState, Settings};
use smallifier::stats::Stats;

pub const SECRET: &str = "Ringtails have stripy, stripy tails";
pub const BASE_URL: &str = "https://mtrx.to/";
pub const CLIENT_IP: [u8; 4] = [192, 0, 2, 10];

/// A migrated database in a temporary directory.
pub struct TestDb {
    pub pool: Arc<SqlitePool>,
    _dir: TempDir,
}

pub async fn create_test_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smallifier.db");

    let pool = persistence::connect(
        path.to_str().unwrap(),
        5,
        std::time::Duration::from_secs(5),
    )
    .await
    .unwrap();
    create_tables(&pool).await.unwrap();

    TestDb {
        pool: Arc::new(pool),
        _dir: dir,
    }
}

pub struct TestApp {
    pub db: TestDb,
    pub state: AppState,
    pub worker: FollowWorker,
}

impl TestApp {
    /// Link router with a fixed client address, as served in production.
    pub fn router(&self) -> Router {
        app_router(self.state.clone()).layer(MockConnectInfo(SocketAddr::from((CLIENT_IP, 4242))))
    }

    pub fn stats(&self) -> &Stats {
        &self.state.stats
    }

    pub async fn link_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.db.pool.as_ref())
            .await
            .unwrap()
    }

    /// Waits for queued follows, then counts the stored ones for `short_path`.
    pub async fn follow_count(&self, short_path: &str) -> i64 {
        self.state.follow_recorder.wait_idle().await;
        SqliteFollowRepository::new(self.db.pool.clone())
            .count_for(short_path)
            .await
            .unwrap()
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(BASE_URL, Some(256)).await
}

pub async fn create_test_app_with(base_url: &str, length_limit: Option<usize>) -> TestApp {
    let db = create_test_db().await;
    let stats = Arc::new(Stats::new());

    let (follow_recorder, worker) = FollowRecorder::spawn(
        Arc::new(SqliteFollowRepository::new(db.pool.clone())),
        stats.clone(),
        1024,
    );

    let link_service = LinkService::new(
        Arc::new(SqliteLinkRepository::new(db.pool.clone())),
        stats.clone(),
    );

    let settings = Settings {
        base_url: Url::parse(base_url).unwrap(),
        secret: SECRET.to_string(),
        length_limit,
    };

    let state = AppState::new(Arc::new(link_service), follow_recorder, stats, settings);

    TestApp { db, state, worker }
}

pub async fn insert_test_link(pool: &SqlitePool, short_path: &str, long_url: &str) {
    sqlx::query(
        "INSERT INTO links (short_path, long_url, create_ts, create_ip, create_forwarded_for) \
         VALUES (?1, ?2, 1700000000, '127.0.0.1', '')",
    )
    .bind(short_path)
    .bind(long_url)
    .execute(pool)
    .await
    .unwrap();
}
