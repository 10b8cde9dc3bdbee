//! Plaintext "encoder"

use crate::domain::password::{PasswordAlgorithm, PasswordEncoder, PasswordEncodingError};

use super::constant_time_eq;

/// Stores the password unchanged. Only ever as strong as the store itself.
#[derive(Debug, Clone, Default)]
pub struct NoOpEncoder;

impl NoOpEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncoder for NoOpEncoder {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Noop
    }

    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError> {
        Ok(plaintext.to_string())
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        constant_time_eq(plaintext.as_bytes(), hashed.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_identity() {
        let encoder = NoOpEncoder::new();
        assert_eq!(encoder.hash("secret123").unwrap(), "secret123");
    }

    #[test]
    fn test_verify() {
        let encoder = NoOpEncoder::new();
        assert!(encoder.verify("secret123", "secret123"));
        assert!(!encoder.verify("secret123", "secret124"));
        assert!(!encoder.verify("secret123", "secret12"));
    }
}
