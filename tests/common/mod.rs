#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use redis_url_shortener::application::services::{LinkPolicy, LinkService};
use redis_url_shortener::domain::entities::ShortCode;
use redis_url_shortener::domain::generator::CodeGenerator;
use redis_url_shortener::domain::repositories::{InsertOutcome, LinkStore};
use redis_url_shortener::error::{GenerationError, StoreError};
use redis_url_shortener::infrastructure::store::InMemoryLinkStore;
use redis_url_shortener::routes::app_router;
use redis_url_shortener::state::AppState;
use redis_url_shortener::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const BASE_URL: &str = "http://localhost:8080";
pub const MAX_ATTEMPTS: u32 = 5;

pub fn test_policy() -> LinkPolicy {
    LinkPolicy {
        base_url: BASE_URL.to_string(),
        ttl: Duration::from_secs(86_400),
        max_attempts: MAX_ATTEMPTS,
    }
}

pub fn create_test_state(
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(store, generator, test_policy()));
    AppState::new(link_service)
}

/// State backed by an in-memory store the test can inspect.
pub fn create_memory_state() -> (AppState, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new());
    let state = create_test_state(store.clone(), Arc::new(RandomCodeGenerator::new()));
    (state, store)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

/// Extracts the code from a short URL produced with [`BASE_URL`].
pub fn code_of(short_url: &str) -> ShortCode {
    let code = short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("unexpected short url {short_url}"));
    ShortCode::new(code)
}

/// Store whose every call fails as if Redis were down.
#[derive(Default)]
pub struct UnreachableStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl LinkStore for UnreachableStore {
    async fn try_create(
        &self,
        _code: &ShortCode,
        _long_url: &str,
        _ttl: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn get(&self, _code: &ShortCode) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ttl(&self, _code: &ShortCode) -> Result<Option<Duration>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Store that reports every code as already taken.
#[derive(Default)]
pub struct SaturatedStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl LinkStore for SaturatedStore {
    async fn try_create(
        &self,
        _code: &ShortCode,
        _long_url: &str,
        _ttl: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(InsertOutcome::Conflict)
    }

    async fn get(&self, _code: &ShortCode) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn ttl(&self, _code: &ShortCode) -> Result<Option<Duration>, StoreError> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Generator that always yields the same code.
pub struct FixedGenerator(pub &'static str);

impl CodeGenerator for FixedGenerator {
    fn generate(&self) -> Result<ShortCode, GenerationError> {
        Ok(ShortCode::new(self.0))
    }
}

/// Generator whose entropy source is broken.
#[derive(Default)]
pub struct BrokenGenerator {
    pub calls: AtomicUsize,
}

impl CodeGenerator for BrokenGenerator {
    fn generate(&self) -> Result<ShortCode, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError("entropy source unavailable".to_string()))
    }
}
