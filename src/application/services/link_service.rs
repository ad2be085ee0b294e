//! Short path generation and link lookup.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{GenerateError, StoreError};
use crate::stats::Stats;
use crate::utils::short_path::{EntropySource, OsEntropy, random_short_path};

/// Default bound on insert attempts per generated link.
pub const DEFAULT_MAX_ATTEMPTS: usize = 30;

/// Service for creating and resolving short links.
///
/// Short paths are reserved optimistically: a random candidate is inserted
/// directly and the store's unique constraint rejects duplicates, so there is
/// no check-then-insert race between concurrent creators.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    entropy: Arc<dyn EntropySource>,
    stats: Arc<Stats>,
    max_attempts: usize,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a link service using the OS random source and
    /// [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(link_repository: Arc<L>, stats: Arc<Stats>) -> Self {
        Self {
            link_repository,
            entropy: Arc::new(OsEntropy),
            stats,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates a short path for `long_url` and stores the link.
    ///
    /// Each attempt draws a fresh 8-character candidate and inserts it along
    /// with the creation metadata. The first successful insert wins.
    ///
    /// Collisions and other storage errors are logged and retried, up to
    /// `max_attempts` in total.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Entropy`] as soon as the random source fails;
    /// that failure is also counted in [`Stats::random_errors`].
    ///
    /// Returns [`GenerateError::Exhausted`] if every attempt failed.
    pub async fn generate_short_path(
        &self,
        long_url: &str,
        ip: &str,
        forwarded_for: &str,
    ) -> Result<String, GenerateError> {
        for attempt in 1..=self.max_attempts {
            let short_path = match random_short_path(self.entropy.as_ref()) {
                Ok(short_path) => short_path,
                Err(e) => {
                    self.stats.record_random_error();
                    error!(error = %e, "Could not generate random numbers");
                    return Err(e.into());
                }
            };

            let new_link = NewLink {
                short_path: short_path.clone(),
                long_url: long_url.to_string(),
                create_ts: Utc::now().timestamp(),
                create_ip: ip.to_string(),
                create_forwarded_for: forwarded_for.to_string(),
            };

            match self.link_repository.insert(new_link).await {
                Ok(()) => {
                    debug!(short_path = %short_path, attempt, "Link saved");
                    return Ok(short_path);
                }
                Err(StoreError::UniqueViolation) => {
                    warn!(short_path = %short_path, attempt, "Short path collision, retrying");
                }
                Err(e) => {
                    error!(error = %e, attempt, "Error saving link");
                }
            }
        }

        error!(attempts = self.max_attempts, "Could not generate link");
        Err(GenerateError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Looks up the link stored under `short_path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors. A missing link is
    /// `Ok(None)`.
    pub async fn resolve(&self, short_path: &str) -> Result<Option<Link>, StoreError> {
        self.link_repository.find_by_short_path(short_path).await
    }
}
