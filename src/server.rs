//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, schema creation, follow worker spawning, and
//! the Axum server lifecycle including graceful shutdown.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::follow_recorder::FollowRecorder;
use crate::infrastructure::persistence::{
    self, SqliteFollowRepository, SqliteLinkRepository, create_tables,
};
use crate::routes::{app_router, metrics_router};
use crate::state::{AppState, Settings};
use crate::stats::Stats;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Tables and indexes (created if missing)
/// - Background follow worker
/// - Optional metrics listener
/// - Axum HTTP server
///
/// On Ctrl+C or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, then waits up to `SHUTDOWN_DRAIN_TIMEOUT` for queued
/// follows to be written.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema creation fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(
        &config.sqlite_db,
        config.db_max_connections,
        config.db_connect_timeout(),
    )
    .await
    .with_context(|| format!("Failed to open database {}", config.sqlite_db))?;
    tracing::info!("Connected to database");

    create_tables(&pool)
        .await
        .context("Failed to create tables")?;

    let pool = Arc::new(pool);
    let stats = Arc::new(Stats::new());

    let follow_repository = Arc::new(SqliteFollowRepository::new(pool.clone()));
    let (follow_recorder, follow_worker) = FollowRecorder::spawn(
        follow_repository,
        stats.clone(),
        config.follow_queue_capacity,
    );

    let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let link_service = LinkService::new(link_repository, stats.clone())
        .with_max_attempts(config.max_generation_attempts);

    let state = AppState::new(
        Arc::new(link_service),
        follow_recorder,
        stats.clone(),
        Settings::from_config(&config),
    );

    if let Some(ref metrics_addr) = config.metrics_addr {
        let addr: SocketAddr = metrics_addr.parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Metrics listening on http://{addr}/metrics");

        let app = metrics_router(stats.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Metrics server failed");
            }
        });
    }

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and every FollowRecorder clone it held) is gone now, so the
    // worker exits once the queue is empty.
    tracing::info!("Draining follow queue");
    match tokio::time::timeout(config.shutdown_drain_timeout(), follow_worker.join()).await {
        Ok(()) => tracing::info!("Follow queue drained"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_drain_timeout,
            "Timed out draining follow queue, pending follows are lost"
        ),
    }

    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
