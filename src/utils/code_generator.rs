//! Random short code generation.
//!
//! Codes are drawn from the OS entropy source and encoded as URL-safe base64
//! without padding.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::domain::entities::ShortCode;
use crate::domain::generator::CodeGenerator;
use crate::error::GenerationError;

/// Length of random bytes before base64 encoding.
///
/// 6 bytes encode to exactly 8 characters (2^48 possible codes).
pub const CODE_LENGTH_BYTES: usize = 6;

/// Length of every generated code.
pub const CODE_LENGTH: usize = CODE_LENGTH_BYTES * 4 / 3;

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character code.
///
/// # Errors
///
/// Returns [`GenerationError`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.as_str().len(), 8);
/// ```
pub fn generate_code() -> Result<ShortCode, GenerationError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| GenerationError(e.to_string()))?;

    Ok(ShortCode::new(URL_SAFE_NO_PAD.encode(buffer)))
}

/// [`CodeGenerator`] backed by [`generate_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<ShortCode, GenerationError> {
        generate_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code().unwrap();
        assert_eq!(code.as_str().len(), CODE_LENGTH);
        assert_eq!(CODE_LENGTH, 8);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        for _ in 0..100 {
            let code = generate_code().unwrap();
            assert!(
                code.as_str()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_no_padding() {
        let code = generate_code().unwrap();
        assert!(!code.as_str().contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::new();
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generator.generate().unwrap());
        }

        assert_eq!(codes.len(), 1000);
    }
}
