//! Domain layer - Core business logic and entities

pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
pub use password::{
    AlgorithmSelector, PasswordAlgorithm, PasswordEncoder, PasswordEncodingError, TaggedPassword,
};
pub use user::{User, UserId, UserRepository, UserStatus};
