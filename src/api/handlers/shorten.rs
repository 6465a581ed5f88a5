//! Handler for link shortening endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "ShortUrl": "http://localhost:8080/Xb3_k9Qa" }
/// ```
///
/// Every call creates a new mapping; the same long URL submitted twice gets
/// two different codes.
///
/// # Errors
///
/// - 400 Bad Request (plain text) for malformed JSON or a missing/empty `longUrl`.
///   Nothing is generated or written in that case.
/// - 500 Internal Server Error (plain text) when code generation fails, the
///   store fails, or no free code was found within the attempt limit.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected shorten request body: {}", e);
        AppError::bad_request("Invalid request body")
    })?;

    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(&payload.long_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: link.short_url,
    }))
}

/// Answers cross-origin pre-flight requests.
///
/// # Endpoint
///
/// `OPTIONS /api/shorten`
///
/// Returns 200 with an empty body; the request body is never read.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
