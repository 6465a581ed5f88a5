//! In-memory mapping store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::entities::ShortCode;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

/// Every this many writes, expired entries are swept out of the map.
const SWEEP_EVERY: u64 = 256;

#[derive(Debug, Clone)]
struct StoredLink {
    long_url: String,
    expires_at: Instant,
}

impl StoredLink {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local store with per-mapping expiry.
///
/// DashMap's entry API holds the shard lock for the whole check-and-insert,
/// which gives the same set-if-absent guarantee as Redis `SET NX`. Expiry
/// follows the tokio clock so tests can pause and advance time.
///
/// Expired entries are dropped on read and swept every [`SWEEP_EVERY`]
/// writes, so codes nobody reads again do not pile up.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    entries: DashMap<String, StoredLink>,
    writes: AtomicU64,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live mappings.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every expired mapping and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, stored| !stored.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());

        if purged > 0 {
            debug!("Purged {} expired mappings", purged);
        }

        purged
    }

    fn live(&self, code: &ShortCode) -> Option<StoredLink> {
        let key = code.as_str();
        let entry = self.entries.get(key)?;

        if entry.is_expired(Instant::now()) {
            drop(entry);
            self.entries
                .remove_if(key, |_, stored| stored.is_expired(Instant::now()));
            return None;
        }

        Some(entry.clone())
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn try_create(
        &self,
        code: &ShortCode,
        long_url: &str,
        ttl: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        let now = Instant::now();
        let stored = StoredLink {
            long_url: long_url.to_string(),
            expires_at: now + ttl,
        };

        let outcome = match self.entries.entry(code.as_str().to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(stored);
                    InsertOutcome::Created
                } else {
                    debug!("Store SET NX conflict: {}", code);
                    InsertOutcome::Conflict
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(stored);
                InsertOutcome::Created
            }
        };

        // The entry guard is released above; retain needs every shard lock.
        if self.writes.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.purge_expired();
        }

        Ok(outcome)
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>, StoreError> {
        Ok(self.live(code).map(|stored| stored.long_url))
    }

    async fn ttl(&self, code: &ShortCode) -> Result<Option<Duration>, StoreError> {
        Ok(self
            .live(code)
            .map(|stored| stored.expires_at.saturating_duration_since(Instant::now())))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
