//! API route configuration.

use crate::api::handlers::{preflight_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST    /shorten` - Create a short URL
/// - `OPTIONS /shorten` - Cross-origin pre-flight, answered without a body
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler).options(preflight_handler))
}
