//! Error types shared across layers.
//!
//! - [`StoreError`] - operational failures of the mapping store
//! - [`GenerationError`] - entropy source failures while generating codes
//! - [`ShortenError`] - outcome of a failed link creation
//! - [`AppError`] - HTTP-facing error rendered as a plain-text response

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use crate::domain::entities::ShortCode;

/// Failures of the key-value store that are not collisions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store command failed: {0}")]
    Command(String),

    #[error("unexpected store reply: {0}")]
    UnexpectedReply(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        Self::Command(e.to_string())
    }
}

/// The identifier source could not produce a code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to generate short code: {0}")]
pub struct GenerationError(pub String);

/// Reasons a link creation request ended without a mapping.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("long URL must not be empty")]
    EmptyUrl,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The write for `code` did not complete cleanly. It may still have been
    /// applied, in which case the mapping lives until its TTL runs out.
    #[error("store write for code {code} failed: {source}")]
    StoreWrite {
        code: ShortCode,
        #[source]
        source: StoreError,
    },

    #[error("no free short code after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
}

impl ShortenError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyUrl => "empty_url",
            Self::Generation(_) => "generation",
            Self::Store(_) | Self::StoreWrite { .. } => "store",
            Self::ExhaustedRetries { .. } => "exhausted_retries",
        }
    }
}

/// Error returned by HTTP handlers.
///
/// Rendered as a plain-text body so that clients get a human-readable message.
/// Internal details stay in the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, self.to_string()).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            Self::bad_request("Invalid request body")
        } else {
            Self::bad_request(messages.join("; "))
        }
    }
}

impl From<ShortenError> for AppError {
    fn from(err: ShortenError) -> Self {
        match err {
            ShortenError::EmptyUrl => Self::bad_request("longUrl is required"),
            ShortenError::Generation(_) => Self::internal("Failed to generate short code"),
            ShortenError::Store(_) | ShortenError::StoreWrite { .. } => {
                Self::internal("Storage is unavailable")
            }
            ShortenError::ExhaustedRetries { .. } => {
                Self::internal("Could not allocate a unique short code")
            }
        }
    }
}
