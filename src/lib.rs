//! # Redis URL Shortener
//!
//! A small URL shortening service built with Axum and Redis. It creates
//! mappings only; resolving codes back to long URLs is left to other services
//! reading the same store.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short codes, generator and store traits
//! - **Application Layer** ([`application`]) - Link creation with bounded collision retry
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## How a code is allocated
//!
//! 1. Generate 6 random bytes, encode as 8 base64url characters
//! 2. `SET <code> <long url> NX EX <ttl>`
//! 3. On conflict generate again, up to `MAX_ATTEMPTS` times
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_ADDRESS="localhost:6379"
//! export BASE_URL="http://localhost:8080"
//!
//! cargo run
//!
//! curl -X POST localhost:8080/api/shorten -d '{"longUrl":"https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkPolicy, LinkService};
    pub use crate::domain::entities::{CreatedLink, ShortCode};
    pub use crate::domain::generator::CodeGenerator;
    pub use crate::domain::repositories::{InsertOutcome, LinkStore};
    pub use crate::error::{AppError, GenerationError, ShortenError, StoreError};
    pub use crate::infrastructure::store::{InMemoryLinkStore, RedisLinkStore};
    pub use crate::state::AppState;
}
