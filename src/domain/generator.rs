//! Code generator abstraction.

use crate::domain::entities::ShortCode;
use crate::error::GenerationError;

/// Produces candidate short codes.
///
/// Implementations have no external side effects and do not check the store.
/// Callers pair every candidate with a set-if-absent write.
///
/// # Implementations
///
/// - [`crate::utils::code_generator::RandomCodeGenerator`] - OS entropy, base64url
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the identifier source fails.
    fn generate(&self) -> Result<ShortCode, GenerationError>;
}
