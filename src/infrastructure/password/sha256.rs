//! Salted, iterated SHA-256 encoder

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::password::{PasswordAlgorithm, PasswordEncoder, PasswordEncodingError};

use super::constant_time_eq;

const SALT_LENGTH: usize = 8;
const DEFAULT_ITERATIONS: u32 = 1024;

/// Hex encoding of `salt || digest`, where the digest is SHA-256 over
/// `salt || secret || password` re-hashed `iterations - 1` more times.
///
/// Kept for parity with legacy stores; it is much weaker than the
/// key-derivation schemes.
#[derive(Debug, Clone)]
pub struct Sha256Encoder {
    secret: String,
    iterations: u32,
}

impl Sha256Encoder {
    pub fn new() -> Self {
        Self::with_secret("")
    }

    /// Mix a site-wide secret into every digest
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            iterations: DEFAULT_ITERATIONS,
        }
    }

    fn digest(&self, salt: &[u8], plaintext: &str) -> Vec<u8> {
        let mut digest = Sha256::new()
            .chain_update(salt)
            .chain_update(self.secret.as_bytes())
            .chain_update(plaintext.as_bytes())
            .finalize();

        for _ in 1..self.iterations {
            digest = Sha256::digest(digest.as_slice());
        }

        let mut output = Vec::with_capacity(salt.len() + digest.len());
        output.extend_from_slice(salt);
        output.extend_from_slice(&digest);
        output
    }
}

impl Default for Sha256Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for Sha256Encoder {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Sha256
    }

    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError> {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);

        Ok(hex::encode(self.digest(&salt, plaintext)))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let decoded = match hex::decode(hashed) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        if decoded.len() <= SALT_LENGTH {
            return false;
        }

        let expected = self.digest(&decoded[..SALT_LENGTH], plaintext);
        constant_time_eq(&expected, &decoded)
    }
}
