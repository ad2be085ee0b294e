//! Error counters read by the metrics endpoint and operational tooling.
//!
//! One [`Stats`] value is created at startup and shared by `Arc` with the
//! handlers, the path generator, and the follow worker. Every counter is a
//! monotonically increasing `AtomicU64`; increments and reads never lock.
//!
//! Each increment is mirrored into the [`metrics`] facade, so a process that
//! installs a recorder sees the same counters under the same names.

use std::sync::atomic::{AtomicU64, Ordering};

pub const RANDOM_ERROR_COUNT: &str = "random_error_count";
pub const AUTH_ERROR_COUNT: &str = "auth_error_count";
pub const DB_UPDATE_ERROR_COUNT: &str = "db_update_error_count";

/// Shared error counters.
#[derive(Debug, Default)]
pub struct Stats {
    random_errors: AtomicU64,
    auth_errors: AtomicU64,
    db_update_errors: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub random_errors: u64,
    pub auth_errors: u64,
    pub db_update_errors: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// The OS random source failed. Should stay at zero on a healthy host.
    pub fn record_random_error(&self) {
        self.random_errors.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(RANDOM_ERROR_COUNT).increment(1);
    }

    /// A create request carried a missing or wrong secret.
    pub fn record_auth_error(&self) {
        self.auth_errors.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(AUTH_ERROR_COUNT).increment(1);
    }

    /// A best-effort database write failed.
    pub fn record_db_update_error(&self) {
        self.db_update_errors.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(DB_UPDATE_ERROR_COUNT).increment(1);
    }

    pub fn random_errors(&self) -> u64 {
        self.random_errors.load(Ordering::Relaxed)
    }

    pub fn auth_errors(&self) -> u64 {
        self.auth_errors.load(Ordering::Relaxed)
    }

    pub fn db_update_errors(&self) -> u64 {
        self.db_update_errors.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            random_errors: self.random_errors(),
            auth_errors: self.auth_errors(),
            db_update_errors: self.db_update_errors(),
        }
    }

    /// Renders the counters in Prometheus text exposition format.
    pub fn render_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = String::with_capacity(512);

        let counters = [
            (
                RANDOM_ERROR_COUNT,
                "Counts number of errors encountered when trying to generate secure random numbers",
                snapshot.random_errors,
            ),
            (
                AUTH_ERROR_COUNT,
                "Counts number of errors encountered because of missing or incorrect secrets",
                snapshot.auth_errors,
            ),
            (
                DB_UPDATE_ERROR_COUNT,
                "Counts number of errors encountered updating the database",
                snapshot.db_update_errors,
            ),
        ];

        for (name, help, value) in counters {
            out.push_str(&format!(
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"
            ));
        }

        out
    }
}
