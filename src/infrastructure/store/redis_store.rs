//! Redis-backed mapping store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, Value, aio::ConnectionManager};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::entities::ShortCode;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

/// Connection attempts made at startup before giving up.
const CONNECT_ATTEMPTS: usize = 5;

/// Redis store for URL mappings.
///
/// Uses a `ConnectionManager` shared by all request flows; it reconnects on
/// its own after a dropped connection. Every command is bounded by
/// `command_timeout`.
#[derive(Clone)]
pub struct RedisLinkStore {
    manager: ConnectionManager,
    command_timeout: Duration,
    key_prefix: String,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `command_timeout` - Upper bound for each round-trip, including the initial connect
    /// - `key_prefix` - Namespace prepended to every code
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        command_timeout: Duration,
        key_prefix: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(command_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(command_timeout))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            manager,
            command_timeout,
            key_prefix: key_prefix.to_string(),
        };

        let mut conn = store.manager.clone();
        store
            .bounded(async move { conn.ping::<()>().await })
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(store)
    }

    /// Same as [`Self::connect`], retried with exponential backoff.
    ///
    /// Used at startup so that the service survives Redis coming up a moment
    /// later than the application.
    pub async fn connect_with_retry(
        redis_url: &str,
        command_timeout: Duration,
        key_prefix: &str,
    ) -> Result<Self, StoreError> {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(CONNECT_ATTEMPTS - 1);

        Retry::start(strategy, || async move {
            Self::connect(redis_url, command_timeout, key_prefix)
                .await
                .inspect_err(|e| warn!(error = %e, "Redis connection attempt failed"))
        })
        .await
    }

    fn key(&self, code: &ShortCode) -> String {
        store_key(&self.key_prefix, code)
    }

    /// Runs a Redis round-trip under the command timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.command_timeout)),
        }
    }
}

/// Constructs the full Redis key with namespace prefix.
fn store_key(prefix: &str, code: &ShortCode) -> String {
    format!("{}{}", prefix, code)
}

/// Redis `EX` takes whole seconds; anything shorter would be rejected.
fn expire_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// Maps the reply of `SET ... NX` to an insert outcome.
///
/// `OK` means the key was written, a nil reply means it already existed.
fn set_nx_outcome(reply: Value) -> Result<InsertOutcome, StoreError> {
    match reply {
        Value::Okay => Ok(InsertOutcome::Created),
        Value::SimpleString(ref s) if s == "OK" => Ok(InsertOutcome::Created),
        Value::Nil => Ok(InsertOutcome::Conflict),
        other => Err(StoreError::UnexpectedReply(format!("{:?}", other))),
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn try_create(
        &self,
        code: &ShortCode,
        long_url: &str,
        ttl: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        let key = self.key(code);
        let seconds = expire_seconds(ttl);
        let mut conn = self.manager.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key)
            .arg(long_url)
            .arg("NX")
            .arg("EX")
            .arg(seconds);

        let reply = self
            .bounded(async move { cmd.query_async::<Value>(&mut conn).await })
            .await?;

        let outcome = set_nx_outcome(reply)?;
        match outcome {
            InsertOutcome::Created => {
                debug!("Store SET NX: {} -> {} (TTL: {}s)", key, long_url, seconds)
            }
            InsertOutcome::Conflict => debug!("Store SET NX conflict: {}", key),
        }

        Ok(outcome)
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>, StoreError> {
        let key = self.key(code);
        let mut conn = self.manager.clone();

        self.bounded(async move { conn.get::<_, Option<String>>(&key).await })
            .await
    }

    async fn ttl(&self, code: &ShortCode) -> Result<Option<Duration>, StoreError> {
        let key = self.key(code);
        let mut conn = self.manager.clone();

        let seconds = self
            .bounded(async move { conn.ttl::<_, i64>(&key).await })
            .await?;

        // -2: no such key, -1: key without expiry
        Ok(u64::try_from(seconds).ok().map(Duration::from_secs))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.manager.clone();
        self.bounded(async move { conn.ping::<()>().await })
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_without_prefix_is_the_code() {
        assert_eq!(store_key("", &ShortCode::new("abc123")), "abc123");
    }

    #[test]
    fn test_store_key_with_prefix() {
        assert_eq!(store_key("url:", &ShortCode::new("abc123")), "url:abc123");
    }

    #[test]
    fn test_expire_seconds_uses_whole_seconds() {
        assert_eq!(expire_seconds(Duration::from_secs(86_400)), 86_400);
        assert_eq!(expire_seconds(Duration::from_millis(1_500)), 1);
        assert_eq!(expire_seconds(Duration::from_millis(10)), 1);
    }

    #[test]
    fn test_set_nx_ok_is_created() {
        assert_eq!(set_nx_outcome(Value::Okay).unwrap(), InsertOutcome::Created);
        assert_eq!(
            set_nx_outcome(Value::SimpleString("OK".to_string())).unwrap(),
            InsertOutcome::Created
        );
    }

    #[test]
    fn test_set_nx_nil_is_conflict() {
        assert_eq!(set_nx_outcome(Value::Nil).unwrap(), InsertOutcome::Conflict);
    }

    #[test]
    fn test_set_nx_other_reply_is_error() {
        assert!(matches!(
            set_nx_outcome(Value::Int(1)),
            Err(StoreError::UnexpectedReply(_))
        ));
        assert!(matches!(
            set_nx_outcome(Value::SimpleString("QUEUED".to_string())),
            Err(StoreError::UnexpectedReply(_))
        ));
    }

    /// Needs a Redis server at `REDIS_URL` (default `redis://127.0.0.1:6379/0`).
    #[tokio::test]
    #[ignore]
    async fn test_set_nx_against_live_redis() {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string());
        let store = RedisLinkStore::connect(&url, Duration::from_secs(2), "test:")
            .await
            .unwrap();
        let code = crate::utils::code_generator::generate_code().unwrap();

        let first = store
            .try_create(&code, "https://first.com", Duration::from_secs(30))
            .await
            .unwrap();
        let second = store
            .try_create(&code, "https://second.com", Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(first, InsertOutcome::Created);
        assert_eq!(second, InsertOutcome::Conflict);
        assert_eq!(
            store.get(&code).await.unwrap().as_deref(),
            Some("https://first.com")
        );
        assert!(store.ttl(&code).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisLinkStore::connect("not-a-redis-url", Duration::from_millis(100), "").await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }
}
