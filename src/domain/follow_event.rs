//! Follow event model for asynchronous visit logging.

use crate::domain::entities::NewFollow;

/// An in-memory visit record queued by the lookup handler.
///
/// Created after a successful lookup, sent to the
/// [`crate::domain::follow_recorder::FollowRecorder`] queue, and turned into a
/// [`NewFollow`] row by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEvent {
    pub short_path: String,
    /// Visit time in Unix seconds, taken when the redirect was issued.
    pub timestamp: i64,
    pub ip: String,
    pub forwarded_for: String,
}

impl FollowEvent {
    /// Creates a new follow event.
    ///
    /// # Arguments
    ///
    /// - `short_path` - The short path that was followed
    /// - `timestamp` - Unix seconds
    /// - `ip` - Peer address of the client
    /// - `forwarded_for` - Raw `X-Forwarded-For` header, empty when absent
    pub fn new(short_path: String, timestamp: i64, ip: String, forwarded_for: String) -> Self {
        Self {
            short_path,
            timestamp,
            ip,
            forwarded_for,
        }
    }
}

impl From<FollowEvent> for NewFollow {
    fn from(ev: FollowEvent) -> Self {
        NewFollow {
            short_path: ev.short_path,
            ts: ev.timestamp,
            ip: ev.ip,
            forwarded_for: ev.forwarded_for,
        }
    }
}
