//! Random short path generation.
//!
//! A short path is 6 random bytes encoded as URL-safe base64 without
//! padding, which always yields 8 characters from `[A-Za-z0-9_-]`.

use base64::Engine as _;

use crate::error::EntropyError;

/// Number of random bytes drawn per candidate.
pub const SHORT_PATH_BYTES: usize = 6;

/// Length of an encoded short path.
pub const SHORT_PATH_LEN: usize = 8;

/// Source of cryptographically secure random bytes.
pub trait EntropySource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating system random source via `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(buf).map_err(|e| EntropyError(e.to_string()))
    }
}

/// Draws a fresh candidate short path from `source`.
///
/// # Errors
///
/// Returns [`EntropyError`] if the random source fails.
pub fn random_short_path(source: &dyn EntropySource) -> Result<String, EntropyError> {
    let mut buffer = [0u8; SHORT_PATH_BYTES];
    source.fill(&mut buffer)?;
    Ok(encode_short_path(&buffer))
}

pub fn encode_short_path(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
            buf.fill(self.0);
            Ok(())
        }
    }

    struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError("entropy pool exhausted".to_string()))
        }
    }

    #[test]
    fn test_random_short_path_has_correct_length() {
        let path = random_short_path(&OsEntropy).unwrap();
        assert_eq!(path.len(), SHORT_PATH_LEN);
    }

    #[test]
    fn test_random_short_path_url_safe_characters() {
        for _ in 0..100 {
            let path = random_short_path(&OsEntropy).unwrap();
            assert!(
                path.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {path}"
            );
            assert!(!path.contains('='));
        }
    }

    #[test]
    fn test_random_short_path_produces_unique_paths() {
        let paths: HashSet<String> = (0..1000)
            .map(|_| random_short_path(&OsEntropy).unwrap())
            .collect();

        assert_eq!(paths.len(), 1000);
    }

    #[test]
    fn test_encoding_uses_url_safe_alphabet() {
        assert_eq!(encode_short_path(&[0xff; SHORT_PATH_BYTES]), "________");
        assert_eq!(encode_short_path(&[0xfb; SHORT_PATH_BYTES]), "-_v7-_v7");
        assert_eq!(encode_short_path(&[0x00; SHORT_PATH_BYTES]), "AAAAAAAA");
    }

    #[test]
    fn test_generate_uses_source_bytes() {
        let path = random_short_path(&FixedEntropy(0)).unwrap();
        assert_eq!(path, "AAAAAAAA");
    }

    #[test]
    fn test_generate_propagates_source_failure() {
        let err = random_short_path(&FailingEntropy).unwrap_err();
        assert!(err.to_string().contains("entropy pool exhausted"));
    }
}
