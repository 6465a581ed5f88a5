//! Mapping store trait.

use std::time::Duration;

use crate::domain::entities::ShortCode;
use crate::error::StoreError;
use async_trait::async_trait;

/// Result of a set-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The mapping was written and its TTL started.
    Created,
    /// A live mapping already holds this code. Nothing was overwritten.
    Conflict,
}

/// Key-value store holding `code -> long URL` mappings with a TTL.
///
/// The store owns the mapping lifecycle: mappings are created once by
/// [`LinkStore::try_create`] and removed only by expiry.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - `SET NX EX` on Redis
/// - [`crate::infrastructure::store::InMemoryLinkStore`] - process-local store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Atomically writes `code -> long_url` unless the code is already taken.
    ///
    /// Two concurrent callers never both observe [`InsertOutcome::Created`]
    /// for the same code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable, times out or
    /// rejects the write for a reason other than a collision.
    async fn try_create(
        &self,
        code: &ShortCode,
        long_url: &str,
        ttl: Duration,
    ) -> Result<InsertOutcome, StoreError>;

    /// Returns the long URL stored under `code`, if the mapping is live.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>, StoreError>;

    /// Returns the remaining lifetime of the mapping.
    ///
    /// `None` when the mapping does not exist.
    async fn ttl(&self, code: &ShortCode) -> Result<Option<Duration>, StoreError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
