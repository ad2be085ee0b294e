//! Repository trait for the append-only follow log.

use crate::domain::entities::{Follow, NewFollow};
use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for the `follows` table.
///
/// Only the follow worker writes through this trait; there is no update or
/// delete path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Appends a follow row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn record(&self, new_follow: NewFollow) -> Result<(), StoreError>;

    /// Counts follows recorded for a short path.
    async fn count_for(&self, short_path: &str) -> Result<i64, StoreError>;

    /// Lists follows recorded for a short path, oldest first.
    async fn list_for(&self, short_path: &str) -> Result<Vec<Follow>, StoreError>;
}
