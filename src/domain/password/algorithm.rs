//! Password algorithm catalogue

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PasswordEncodingError;

/// The five password-hashing schemes a stored password can be tagged with.
///
/// Codes are stable: registration draws a code and resolves it to an
/// algorithm, so reordering variants changes which scheme a draw selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    /// Plaintext, compared for equality
    Noop,
    /// bcrypt with a per-hash salt
    Bcrypt,
    /// PBKDF2-HMAC-SHA256
    Pbkdf2,
    /// scrypt
    Scrypt,
    /// Salted, iterated SHA-256
    Sha256,
}

impl PasswordAlgorithm {
    /// All algorithms, indexed by code
    pub const ALL: [PasswordAlgorithm; 5] = [
        Self::Noop,
        Self::Bcrypt,
        Self::Pbkdf2,
        Self::Scrypt,
        Self::Sha256,
    ];

    /// Number of registered algorithm codes
    pub const COUNT: usize = Self::ALL.len();

    pub fn code(&self) -> usize {
        match self {
            Self::Noop => 0,
            Self::Bcrypt => 1,
            Self::Pbkdf2 => 2,
            Self::Scrypt => 3,
            Self::Sha256 => 4,
        }
    }

    /// Tag name used inside `{...}` of a stored password
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Bcrypt => "bcrypt",
            Self::Pbkdf2 => "pbkdf2",
            Self::Scrypt => "scrypt",
            Self::Sha256 => "sha256",
        }
    }

    pub fn from_code(code: usize) -> Result<Self, PasswordEncodingError> {
        Self::ALL
            .get(code)
            .copied()
            .ok_or(PasswordEncodingError::InvalidCode {
                code,
                count: Self::COUNT,
            })
    }

    pub fn from_name(name: &str) -> Result<Self, PasswordEncodingError> {
        Self::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| PasswordEncodingError::UnknownAlgorithm {
                name: name.to_string(),
            })
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = PasswordEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
