//! Link creation service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{CreatedLink, ShortCode};
use crate::domain::generator::CodeGenerator;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::ShortenError;

/// Parameters applied to every created link.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    /// Public base URL the short code is appended to.
    pub base_url: String,
    /// Lifetime of a mapping in the store.
    pub ttl: Duration,
    /// Maximum number of generate/insert cycles per request.
    pub max_attempts: u32,
}

/// Service for creating short links.
///
/// Pairs every generated candidate with an atomic set-if-absent write, so
/// uniqueness is decided by the store rather than by the generator.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
    ttl: Duration,
    max_attempts: u32,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// Trailing slashes are trimmed from the base URL, and `max_attempts` is
    /// raised to at least one.
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn CodeGenerator>,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: policy.base_url.trim_end_matches('/').to_string(),
            ttl: policy.ttl,
            max_attempts: policy.max_attempts.max(1),
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// # Flow
    ///
    /// 1. Generate a candidate code
    /// 2. Write it with set-if-absent and the configured TTL
    /// 3. On conflict, go back to 1 until `max_attempts` is reached
    ///
    /// Identical long URLs are not deduplicated: each call creates a new
    /// mapping with its own code.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::EmptyUrl`] if `long_url` is empty (nothing is generated or written)
    /// - [`ShortenError::Generation`] if the code source fails (not retried)
    /// - [`ShortenError::StoreWrite`] if the store fails (not retried); it carries
    ///   the candidate code, which may have been written anyway
    /// - [`ShortenError::ExhaustedRetries`] if every attempt collided
    pub async fn create_short_link(&self, long_url: &str) -> Result<CreatedLink, ShortenError> {
        if long_url.is_empty() {
            debug!("Rejected empty long URL");
            return Err(ShortenError::EmptyUrl);
        }

        let result = self.allocate(long_url).await;

        match &result {
            Ok(link) => {
                metrics::counter!("links_created_total").increment(1);
                info!(code = %link.code, attempts = link.attempts, "Short link created");
            }
            Err(e) => {
                metrics::counter!("link_create_failures_total", "reason" => e.reason())
                    .increment(1);
                error!(error = %e, reason = e.reason(), "Short link creation failed");
            }
        }

        result
    }

    async fn allocate(&self, long_url: &str) -> Result<CreatedLink, ShortenError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate()?;

            let outcome = match self.store.try_create(&code, long_url, self.ttl).await {
                Ok(outcome) => outcome,
                Err(source) => {
                    warn!(
                        code = %code,
                        error = %source,
                        "Store write failed, code may stay mapped until its TTL expires"
                    );
                    return Err(ShortenError::StoreWrite { code, source });
                }
            };

            match outcome {
                InsertOutcome::Created => {
                    let short_url = self.short_url(&code);
                    return Ok(CreatedLink {
                        code,
                        long_url: long_url.to_string(),
                        short_url,
                        ttl: self.ttl,
                        attempts: attempt,
                    });
                }
                InsertOutcome::Conflict => {
                    metrics::counter!("link_code_collisions_total").increment(1);
                    warn!(code = %code, attempt, "Short code collision, regenerating");
                }
            }
        }

        Err(ShortenError::ExhaustedRetries {
            attempts: self.max_attempts,
        })
    }

    /// Constructs the full short URL from the base URL and a code.
    pub fn short_url(&self, code: &ShortCode) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Returns the long URL currently stored under `code`.
    ///
    /// Used for inspection only; the service does not serve redirects.
    pub async fn lookup(
        &self,
        code: &ShortCode,
    ) -> Result<Option<(String, Option<Duration>)>, ShortenError> {
        let Some(long_url) = self.store.get(code).await? else {
            debug!("No mapping for {}", code);
            return Ok(None);
        };
        let ttl = self.store.ttl(code).await?;

        Ok(Some((long_url, ttl)))
    }

    /// Checks if the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }
}
