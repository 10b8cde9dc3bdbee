//! Password encoder trait

use std::fmt::Debug;

use super::algorithm::PasswordAlgorithm;
use super::error::PasswordEncodingError;

/// A stateless one-way password transformation with a matching check
pub trait PasswordEncoder: Send + Sync + Debug {
    /// The algorithm this encoder implements
    fn algorithm(&self) -> PasswordAlgorithm;

    /// Hash a plaintext password
    fn hash(&self, plaintext: &str) -> Result<String, PasswordEncodingError>;

    /// Check a plaintext password against a hash produced by `hash`
    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}
