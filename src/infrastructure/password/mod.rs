//! Password encoding infrastructure
//!
//! Concrete encoders for the five tagged algorithms, the registry that
//! dispatches between them, and the random selectors used at registration.

mod bcrypt_encoder;
mod noop;
mod pbkdf2_encoder;
mod registry;
mod scrypt_encoder;
mod selector;
mod sha256;

pub use bcrypt_encoder::{BcryptEncoder, DEFAULT_BCRYPT_COST};
pub use noop::NoOpEncoder;
pub use pbkdf2_encoder::{Pbkdf2Encoder, DEFAULT_PBKDF2_ROUNDS};
pub use registry::EncoderRegistry;
pub use scrypt_encoder::{ScryptEncoder, DEFAULT_SCRYPT_LOG_N};
pub use selector::{SeededSelector, ThreadRngSelector};
pub use sha256::Sha256Encoder;

#[cfg(test)]
pub(crate) use registry::tests::fast_registry;

use pbkdf2::password_hash::{self, SaltString};
use rand::RngCore;

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;

    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

/// Random salt for the PHC-string encoders
fn random_salt(length: usize) -> Result<SaltString, password_hash::Error> {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut bytes);
    SaltString::encode_b64(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_random_salt_differs() {
        let a = random_salt(16).unwrap();
        let b = random_salt(16).unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }
}
