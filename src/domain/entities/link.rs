//! Link entity representing a created URL mapping.

use std::time::Duration;

use super::ShortCode;

/// A mapping that the store accepted.
///
/// Returned only after a successful set-if-absent write, so every value of
/// this type corresponds to exactly one live mapping at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub code: ShortCode,
    pub long_url: String,
    pub short_url: String,
    pub ttl: Duration,
    /// Number of generate/insert cycles it took to find a free code.
    pub attempts: u32,
}
