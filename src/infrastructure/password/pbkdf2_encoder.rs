//! PBKDF2 encoder

use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier};
use pbkdf2::{Algorithm, Params, Pbkdf2};

use crate::domain::password::{PasswordAlgorithm, PasswordEncoder, PasswordEncodingError};

use super::random_salt;

pub const DEFAULT_PBKDF2_ROUNDS: u32 = 185_000;
const OUTPUT_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// PBKDF2-HMAC-SHA256, stored as a PHC string (`$pbkdf2-sha256$i=..$salt$hash`)
#[derive(Debug, Clone)]
pub struct Pbkdf2Encoder {
    rounds: u32,
}

impl Pbkdf2Encoder {
    pub fn new() -> Self {
        Self::with_rounds(DEFAULT_PBKDF2_ROUNDS)
    }

    pub fn with_rounds(rounds: u32) -> Self {
        Self { rounds }
    }

    fn params(&self) -> Params {
        Params {
            rounds: self.rounds,
            output_length: OUTPUT_LENGTH,
        }
    }
}

impl Default for Pbkdf2Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for Pbkdf2Encoder {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Pbkdf2
    }

    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError> {
        let to_error = |e: pbkdf2::password_hash::Error| {
            PasswordEncodingError::hashing(self.algorithm().name(), e.to_string())
        };

        let salt = random_salt(SALT_LENGTH).map_err(to_error)?;

        Pbkdf2
            .hash_password_customized(
                plaintext.as_bytes(),
                Some(Algorithm::Pbkdf2Sha256.ident()),
                None,
                self.params(),
                &salt,
            )
            .map(|hash| hash.to_string())
            .map_err(to_error)
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hashed) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Pbkdf2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
