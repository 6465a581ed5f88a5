//! Mapping stores.
//!
//! Provides two [`LinkStore`] implementations:
//! - [`RedisLinkStore`] - Production Redis-backed store
//! - [`InMemoryLinkStore`] - Process-local store for tests and development

mod memory_store;
mod redis_store;

pub use memory_store::InMemoryLinkStore;
pub use redis_store::RedisLinkStore;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;

/// Builds the store selected by the configuration.
///
/// The Redis store is connected (with retries) and verified with a PING
/// before it is returned.
///
/// # Errors
///
/// Returns an error if the Redis backend is selected without an address, or
/// the connection cannot be established.
pub async fn connect_from_config(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_ADDRESS (or REDIS_URL) must be set")?;

            let store = RedisLinkStore::connect_with_retry(
                redis_url,
                config.store_timeout(),
                &config.key_prefix,
            )
            .await
            .context("Could not connect to Redis")?;

            info!("Store enabled (Redis)");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Store is in-memory; mappings are lost on restart");
            Ok(Arc::new(InMemoryLinkStore::new()))
        }
    }
}
