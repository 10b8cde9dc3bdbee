//! User domain
//!
//! This module provides domain types and traits for back-office users,
//! including the user entity, validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
