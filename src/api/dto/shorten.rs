//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// A missing `longUrl` deserializes to an empty string and is rejected by
/// validation.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. Its format is not checked.
    #[serde(rename = "longUrl", default)]
    #[validate(length(min = 1, message = "longUrl is required"))]
    pub long_url: String,
}

/// Response containing the composed short URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    #[serde(rename = "ShortUrl")]
    pub short_url: String,
}
