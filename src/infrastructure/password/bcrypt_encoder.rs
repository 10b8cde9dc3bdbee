//! bcrypt encoder

use crate::domain::password::{PasswordAlgorithm, PasswordEncoder, PasswordEncodingError};

/// Work factor used unless overridden
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt with a random per-hash salt (`$2b$<cost>$...`)
///
/// bcrypt only reads the first 72 bytes of its NUL-terminated input.
/// Plaintexts that would be cut are refused instead.
#[derive(Debug, Clone)]
pub struct BcryptEncoder {
    cost: u32,
}

impl BcryptEncoder {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }

    /// Valid costs are 4 to 31; out-of-range costs fail at hash time
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BcryptEncoder {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Bcrypt
    }

    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError> {
        ::bcrypt::non_truncating_hash(plaintext, self.cost)
            .map_err(|e| PasswordEncodingError::hashing(self.algorithm().name(), e.to_string()))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        ::bcrypt::non_truncating_verify(plaintext, hashed).unwrap_or(false)
    }
}
