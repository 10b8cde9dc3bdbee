//! Password encoding errors

use thiserror::Error;

/// Errors raised by the encoder registry and individual encoders
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PasswordEncodingError {
    #[error("Algorithm code {code} is outside the registered range 0..{count}")]
    InvalidCode { code: usize, count: usize },

    #[error("Unknown password algorithm '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("Failed to hash password with {algorithm}: {message}")]
    Hashing { algorithm: String, message: String },

    #[error("Malformed stored password: {message}")]
    MalformedTag { message: String },

    #[error("Encoder for '{name}' registered more than once")]
    DuplicateEncoder { name: String },

    #[error("No encoder registered for '{name}'")]
    IncompleteRegistry { name: String },
}

impl PasswordEncodingError {
    pub fn hashing(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hashing {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTag {
            message: message.into(),
        }
    }
}
