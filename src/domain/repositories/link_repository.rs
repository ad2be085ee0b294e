//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for the `links` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link keyed on its short path.
    ///
    /// The insert is atomic: of two concurrent inserts for the same short
    /// path, at most one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the short path already exists.
    /// Returns [`StoreError::Database`] on any other database error.
    async fn insert(&self, new_link: NewLink) -> Result<(), StoreError>;

    /// Finds a link by its short path.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_short_path(&self, short_path: &str) -> Result<Option<Link>, StoreError>;

    /// Counts all stored links.
    async fn count(&self) -> Result<i64, StoreError>;
}
