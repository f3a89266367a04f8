//! Short code generation.
//!
//! Codes are random bytes from a cryptographically secure source rendered as
//! lowercase hex. The default width of [`CODE_LENGTH_BYTES`] bytes yields
//! 6-character codes such as `a3f09c`.

use crate::error::AppError;
use serde_json::json;

/// Number of random bytes behind a generated code.
pub const CODE_LENGTH_BYTES: usize = 3;

/// A source of secure random bytes.
pub trait EntropySource: Send + Sync {
    /// Fills `buf` completely or fails with [`AppError::EntropySource`].
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError>;
}

/// Operating system entropy via `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        getrandom::fill(buf).map_err(|e| {
            tracing::error!(error = %e, "Secure random source unavailable");
            AppError::entropy("Failed to generate short code", json!({}))
        })
    }
}

/// Generates a code of `byte_len` random bytes rendered as lowercase hex.
///
/// # Errors
///
/// Returns [`AppError::EntropySource`] if the source fails. Callers surface
/// it as a server error and do not retry.
///
/// # Examples
///
/// ```
/// use dynamic_links::utils::code_generator::{CODE_LENGTH_BYTES, OsEntropy, generate_code};
///
/// let code = generate_code(&OsEntropy, CODE_LENGTH_BYTES).unwrap();
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code(source: &dyn EntropySource, byte_len: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; byte_len];
    source.fill(&mut buffer)?;
    Ok(hex::encode(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Deterministic stand-in for the OS source.
    struct SeededEntropy(Mutex<StdRng>);

    impl SeededEntropy {
        fn new(seed: u64) -> Self {
            Self(Mutex::new(StdRng::seed_from_u64(seed)))
        }
    }

    impl EntropySource for SeededEntropy {
        fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
            self.0.lock().unwrap().fill_bytes(buf);
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), AppError> {
            Err(AppError::entropy("unavailable", json!({})))
        }
    }

    fn is_lower_hex(code: &str) -> bool {
        code.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_os_code_has_fixed_length_and_charset() {
        for _ in 0..50 {
            let code = generate_code(&OsEntropy, CODE_LENGTH_BYTES).unwrap();
            assert_eq!(code.len(), 6);
            assert!(is_lower_hex(&code), "unexpected characters in {code}");
        }
    }

    #[test]
    fn test_custom_length() {
        let code = generate_code(&OsEntropy, 8).unwrap();
        assert_eq!(code.len(), 16);
        assert!(is_lower_hex(&code));
    }

    #[test]
    fn test_seeded_codes_do_not_repeat() {
        let source = SeededEntropy::new(42);
        let codes: HashSet<String> = (0..100)
            .map(|_| generate_code(&source, CODE_LENGTH_BYTES).unwrap())
            .collect();

        assert_eq!(codes.len(), 100);
    }

    #[test]
    fn test_same_seed_same_codes() {
        let a = SeededEntropy::new(7);
        let b = SeededEntropy::new(7);

        assert_eq!(
            generate_code(&a, CODE_LENGTH_BYTES).unwrap(),
            generate_code(&b, CODE_LENGTH_BYTES).unwrap()
        );
    }

    #[test]
    fn test_broken_source_is_entropy_error() {
        let result = generate_code(&BrokenEntropy, CODE_LENGTH_BYTES);
        assert!(matches!(result, Err(AppError::EntropySource { .. })));
    }
}
