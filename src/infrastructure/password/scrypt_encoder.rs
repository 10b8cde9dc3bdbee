//! scrypt encoder

use scrypt::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier};
use scrypt::{Params, Scrypt};

use crate::domain::password::{PasswordAlgorithm, PasswordEncoder, PasswordEncodingError};

use super::random_salt;

/// log2 of the CPU/memory cost N (N = 16384)
pub const DEFAULT_SCRYPT_LOG_N: u8 = 14;
const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;
const OUTPUT_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// scrypt, stored as a PHC string (`$scrypt$ln=..,r=8,p=1$salt$hash`)
#[derive(Debug, Clone)]
pub struct ScryptEncoder {
    log_n: u8,
}

impl ScryptEncoder {
    pub fn new() -> Self {
        Self::with_log_n(DEFAULT_SCRYPT_LOG_N)
    }

    pub fn with_log_n(log_n: u8) -> Self {
        Self { log_n }
    }
}

impl Default for ScryptEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for ScryptEncoder {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Scrypt
    }

    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError> {
        let algorithm = self.algorithm().name();

        let params = Params::new(self.log_n, BLOCK_SIZE, PARALLELISM, OUTPUT_LENGTH)
            .map_err(|e| PasswordEncodingError::hashing(algorithm, e.to_string()))?;
        let salt = random_salt(SALT_LENGTH)
            .map_err(|e| PasswordEncodingError::hashing(algorithm, e.to_string()))?;

        Scrypt
            .hash_password_customized(plaintext.as_bytes(), None, None, params, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordEncodingError::hashing(algorithm, e.to_string()))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hashed) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Scrypt
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
