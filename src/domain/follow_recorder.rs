//! Background follow recording.
//!
//! Lookups hand a [`FollowEvent`] to a [`FollowRecorder`] and return their
//! redirect without touching the `follows` table. A single worker task drains
//! the bounded queue and writes the rows one at a time, so follow writes are
//! strictly ordered with respect to each other.
//!
//! # Backpressure
//!
//! When the queue is full, [`FollowRecorder::record`] waits for a free slot
//! instead of dropping the event.
//!
//! # Failure handling
//!
//! A failed insert is logged, counted in
//! [`Stats::db_update_errors`](crate::stats::Stats::db_update_errors), and the
//! event is dropped. Follow logging is best-effort.
//!
//! # Shutdown
//!
//! The worker runs until every [`FollowRecorder`] handle has been dropped,
//! then drains what is left in the queue and exits. [`FollowWorker::join`]
//! waits for that to happen.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::follow_event::FollowEvent;
use crate::domain::repositories::FollowRepository;
use crate::stats::Stats;

/// Number of queued events not yet handled by the worker.
#[derive(Debug, Default)]
struct Pending {
    count: AtomicU64,
    idle: Notify,
}

impl Pending {
    fn begin(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    fn finish(&self) {
        if self.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }

    fn get(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

/// Producer handle for the follow queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FollowRecorder {
    tx: mpsc::Sender<FollowEvent>,
    pending: Arc<Pending>,
}

/// Owns the single consumer task started by [`FollowRecorder::spawn`].
#[derive(Debug)]
pub struct FollowWorker {
    handle: JoinHandle<()>,
}

impl FollowRecorder {
    /// Starts the follow worker with a queue of `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. [`crate::config::Config::validate`]
    /// rejects that value before the server starts.
    pub fn spawn(
        repository: Arc<dyn FollowRepository>,
        stats: Arc<Stats>,
        capacity: usize,
    ) -> (Self, FollowWorker) {
        let (tx, rx) = mpsc::channel(capacity);
        let pending = Arc::new(Pending::default());

        let handle = tokio::spawn(run_follow_worker(
            rx,
            repository,
            stats,
            pending.clone(),
        ));

        (Self { tx, pending }, FollowWorker { handle })
    }

    /// Queues a follow event, waiting while the queue is full.
    ///
    /// Never fails: if the worker has stopped, the event is dropped with a
    /// warning.
    pub async fn record(&self, event: FollowEvent) {
        match self.tx.reserve().await {
            Ok(permit) => {
                self.pending.begin();
                permit.send(event);
            }
            Err(_) => {
                warn!(
                    short_path = %event.short_path,
                    "Follow worker is not running, dropping follow event"
                );
            }
        }
    }

    /// Number of queued follow events not yet written (or failed).
    pub fn pending(&self) -> u64 {
        self.pending.get()
    }

    /// Resolves once every queued follow event has been handled.
    pub async fn wait_idle(&self) {
        loop {
            let idle = self.pending.idle.notified();
            if self.pending.get() == 0 {
                return;
            }
            idle.await;
        }
    }
}

impl FollowWorker {
    /// Waits for the worker to drain the queue and stop.
    ///
    /// The worker only stops after every [`FollowRecorder`] clone is dropped.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            error!(error = %e, "Follow worker terminated abnormally");
        }
    }
}

async fn run_follow_worker(
    mut rx: mpsc::Receiver<FollowEvent>,
    repository: Arc<dyn FollowRepository>,
    stats: Arc<Stats>,
    pending: Arc<Pending>,
) {
    info!("Follow worker started");

    while let Some(ev) = rx.recv().await {
        let short_path = ev.short_path.clone();

        match repository.record(ev.into()).await {
            Ok(()) => debug!(short_path = %short_path, "Follow recorded"),
            Err(e) => {
                error!(error = %e, short_path = %short_path, "Error inserting follow");
                stats.record_db_update_error();
            }
        }

        pending.finish();
    }

    info!("Follow worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Follow, NewFollow};
    use crate::domain::repositories::MockFollowRepository;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn event(short_path: &str, ts: i64) -> FollowEvent {
        FollowEvent::new(
            short_path.to_string(),
            ts,
            "127.0.0.1".to_string(),
            String::new(),
        )
    }

    /// Repository whose inserts wait for a permit before completing.
    struct GatedRepository {
        gate: Semaphore,
        seen: Mutex<Vec<NewFollow>>,
    }

    #[async_trait]
    impl FollowRepository for GatedRepository {
        async fn record(&self, new_follow: NewFollow) -> Result<(), StoreError> {
            self.gate.acquire().await.unwrap().forget();
            self.seen.lock().unwrap().push(new_follow);
            Ok(())
        }

        async fn count_for(&self, short_path: &str) -> Result<i64, StoreError> {
            let seen = self.seen.lock().unwrap();
            Ok(seen.iter().filter(|f| f.short_path == short_path).count() as i64)
        }

        async fn list_for(&self, _short_path: &str) -> Result<Vec<Follow>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_record_writes_follow() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut repo = MockFollowRepository::new();
        repo.expect_record().times(1).returning(move |f| {
            seen_clone.lock().unwrap().push(f);
            Ok(())
        });

        let stats = Arc::new(Stats::new());
        let (recorder, _worker) = FollowRecorder::spawn(Arc::new(repo), stats.clone(), 16);

        recorder
            .record(FollowEvent::new(
                "lemurs01".to_string(),
                1_700_000_000,
                "10.0.0.1".to_string(),
                "203.0.113.5".to_string(),
            ))
            .await;
        recorder.wait_idle().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].short_path, "lemurs01");
        assert_eq!(seen[0].ts, 1_700_000_000);
        assert_eq!(seen[0].ip, "10.0.0.1");
        assert_eq!(seen[0].forwarded_for, "203.0.113.5");
        assert_eq!(recorder.pending(), 0);
        assert_eq!(stats.db_update_errors(), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_is_counted_and_dropped() {
        let mut repo = MockFollowRepository::new();
        repo.expect_record()
            .times(2)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolClosed)));

        let stats = Arc::new(Stats::new());
        let (recorder, _worker) = FollowRecorder::spawn(Arc::new(repo), stats.clone(), 16);

        recorder.record(event("broken01", 1)).await;
        recorder.record(event("broken02", 2)).await;
        recorder.wait_idle().await;

        assert_eq!(stats.db_update_errors(), 2);
        assert_eq!(recorder.pending(), 0);
    }

    #[tokio::test]
    async fn test_events_are_written_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut repo = MockFollowRepository::new();
        repo.expect_record().times(50).returning(move |f| {
            seen_clone.lock().unwrap().push(f.ts);
            Ok(())
        });

        let (recorder, _worker) =
            FollowRecorder::spawn(Arc::new(repo), Arc::new(Stats::new()), 1024);

        for ts in 0..50 {
            recorder.record(event("ordered1", ts)).await;
        }
        recorder.wait_idle().await;

        let expected: Vec<i64> = (0..50).collect();
        assert_eq!(*seen.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_wait_idle_returns_immediately_when_empty() {
        let repo = MockFollowRepository::new();
        let (recorder, _worker) =
            FollowRecorder::spawn(Arc::new(repo), Arc::new(Stats::new()), 4);

        tokio::time::timeout(Duration::from_secs(1), recorder.wait_idle())
            .await
            .expect("wait_idle should not block on an empty queue");
    }

    #[tokio::test]
    async fn test_full_queue_blocks_instead_of_dropping() {
        let repo = Arc::new(GatedRepository {
            gate: Semaphore::new(0),
            seen: Mutex::new(Vec::new()),
        });

        let (recorder, _worker) = FollowRecorder::spawn(repo.clone(), Arc::new(Stats::new()), 1);

        // The worker takes the first event and blocks on the gate; the second
        // fills the only queue slot.
        recorder.record(event("gated001", 1)).await;
        recorder.record(event("gated001", 2)).await;

        let blocked =
            tokio::time::timeout(Duration::from_millis(50), recorder.record(event("gated001", 3)))
                .await;
        assert!(blocked.is_err(), "record should wait while the queue is full");

        repo.gate.add_permits(16);
        recorder.record(event("gated001", 3)).await;
        recorder.wait_idle().await;

        let seen: Vec<i64> = repo.seen.lock().unwrap().iter().map(|f| f.ts).collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_join_drains_queue_after_last_handle_dropped() {
        let repo = Arc::new(GatedRepository {
            gate: Semaphore::new(0),
            seen: Mutex::new(Vec::new()),
        });

        let (recorder, worker) = FollowRecorder::spawn(repo.clone(), Arc::new(Stats::new()), 8);

        for ts in 0..3 {
            recorder.record(event("drain001", ts)).await;
        }
        drop(recorder);

        repo.gate.add_permits(16);
        tokio::time::timeout(Duration::from_secs(5), worker.join())
            .await
            .expect("worker should stop once the queue is drained");

        assert_eq!(repo.seen.lock().unwrap().len(), 3);
    }
}
