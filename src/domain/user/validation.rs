//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Validate a username. Any non-empty string is accepted.
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    Ok(())
}

/// Validate a plaintext password
///
/// An empty password would store an empty `noop` hash, so it is refused.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("ops.admin@corp").is_ok());
        assert!(validate_username("管理员").is_ok());
        assert!(validate_username("john smith").is_ok());
        assert!(validate_username(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(validate_username(""), Err(UserValidationError::EmptyUsername));
    }

    #[test]
    fn test_passwords() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("secret123").is_ok());
        assert!(validate_password(&"p".repeat(129)).is_ok());
        assert_eq!(validate_password(""), Err(UserValidationError::EmptyPassword));
    }
}
